//! CLI Integration Tests for HomeHelp
//!
//! Tests argument parsing and the non-interactive commands (init, config,
//! login, whoami, logout) against the built binary in placeholder mode.

use clap::Parser;
use homehelp::cli::{Cli, Commands, ContextArg, HelperKindArg, RoleArg};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run the homehelp binary inside `working_dir`
fn run_homehelp(args: &[&str], working_dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_homehelp"))
        .args(["--no-color"])
        .args(args)
        .current_dir(working_dir)
        .env_remove("HOMEHELP_AUTH_BASE_URL")
        .env_remove("HOMEHELP_PASSWORD")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Argument Parsing
// =============================================================================

#[test]
fn test_parse_login() {
    let cli = Cli::try_parse_from([
        "homehelp", "login", "--as", "helper", "-e", "ravi@example.com", "-p", "pw",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Login {
            context,
            email,
            password,
        }) => {
            assert_eq!(context, ContextArg::Helper);
            assert_eq!(email, "ravi@example.com");
            assert_eq!(password, "pw");
        }
        other => panic!("unexpected command: {:?}", other),
    }
    assert_eq!(cli.config, Path::new("homehelp.toml"));
}

#[test]
fn test_parse_register_helper() {
    let cli = Cli::try_parse_from([
        "homehelp",
        "register",
        "--as",
        "casual",
        "--name",
        "Ravi",
        "-e",
        "ravi@example.com",
        "--phone",
        "9000000000",
        "-p",
        "pw",
        "--address",
        "Sector 14",
        "--aadhar",
        "1234",
        "--photo",
        "ravi.jpg",
    ])
    .unwrap();

    let Some(Commands::Register(args)) = cli.command else {
        panic!("expected register");
    };
    assert_eq!(args.role, RoleArg::Casual);
    assert_eq!(args.photo.as_deref(), Some(Path::new("ravi.jpg")));
    assert_eq!(args.profession, None);
}

#[test]
fn test_parse_defaults_and_globals() {
    let cli = Cli::try_parse_from(["homehelp", "offers", "--verbose", "-c", "other.toml"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Path::new("other.toml"));
    assert!(matches!(
        cli.command,
        Some(Commands::Offers {
            kind: HelperKindArg::Professional
        })
    ));

    let cli = Cli::try_parse_from(["homehelp", "chat", "new-client"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Chat { ref id, context: ContextArg::Customer }) if id == "new-client"
    ));

    let cli = Cli::try_parse_from(["homehelp", "logout"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Logout { context: None })));
}

#[test]
fn test_parse_rejects_unknown_context() {
    assert!(Cli::try_parse_from(["homehelp", "login", "--as", "admin", "-e", "a@b", "-p", "x"]).is_err());
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_homehelp(&["--help"], dir.path());

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("HomeHelp"));
    assert!(text.contains("Usage"));
    for command in ["init", "config", "login", "register", "book", "chat", "offers"] {
        assert!(text.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run_homehelp(&["--version"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains("homehelp"));
}

// =============================================================================
// Init and Config
// =============================================================================

#[test]
fn test_init_then_validate() {
    let dir = TempDir::new().unwrap();

    let output = run_homehelp(&["init"], dir.path());
    assert!(output.status.success());
    assert!(dir.path().join("homehelp.toml").exists());
    assert!(dir.path().join(".env.example").exists());

    let output = run_homehelp(&["config", "--validate"], dir.path());
    assert!(output.status.success());
    assert!(stdout(&output).contains("placeholder mode"));

    // A second init refuses to overwrite
    let output = run_homehelp(&["init"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn test_validate_reports_bad_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("homehelp.toml"), "[auth]\nbase_url = \"ftp://x\"\n").unwrap();

    let output = run_homehelp(&["config", "--validate"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn test_config_full_prints_toml() {
    let dir = TempDir::new().unwrap();
    let output = run_homehelp(&["config", "--full"], dir.path());

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[timing]"));
    assert!(text.contains("offer_delay_ms = 3000"));
}

// =============================================================================
// Sessions (placeholder mode)
// =============================================================================

#[test]
fn test_login_whoami_logout() {
    let dir = TempDir::new().unwrap();

    let output = run_homehelp(
        &["login", "--as", "customer", "-e", "asha@example.com", "-p", "pw"],
        dir.path(),
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Welcome back, John Doe!"));

    let tokens = fs::read_to_string(dir.path().join(".homehelp/tokens.json")).unwrap();
    assert!(tokens.contains("customer_token"));
    assert!(!tokens.contains("helper_token"));

    let output = run_homehelp(&["whoami"], dir.path());
    let text = stdout(&output);
    assert!(text.contains("signed in"));
    assert!(text.contains("signed out"));

    let output = run_homehelp(&["logout"], dir.path());
    assert!(output.status.success());
    let tokens = fs::read_to_string(dir.path().join(".homehelp/tokens.json")).unwrap();
    assert!(!tokens.contains("customer_token"));
}

#[test]
fn test_login_rejects_invalid_email() {
    let dir = TempDir::new().unwrap();
    let output = run_homehelp(&["login", "--as", "helper", "-e", "nobody", "-p", "pw"], dir.path());

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("valid email"));
}

#[test]
fn test_book_without_session_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    let output = run_homehelp(&["book"], dir.path());

    assert!(!output.status.success());
    assert!(stdout(&output).contains("/user-login"));
}
