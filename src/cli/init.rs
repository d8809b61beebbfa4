//! Init command implementation
//!
//! Writes a commented `homehelp.toml` plus `.env.example` into a directory.

use super::output::Output;
use crate::utils::toml_config::{BASE_URL_ENV, DEFAULT_CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// homehelp.toml found and --force not given
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Backend base URL; `None` writes a placeholder-mode config
    pub base_url: Option<String>,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing HomeHelp");

    let base_path = &config.path;
    let config_path = base_path.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() && !config.force {
        output.warning(&format!("{} already exists!", DEFAULT_CONFIG_FILE));
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    output.subheader("Creating configuration files");

    if let Err(e) = write_file(&config_path, &generate_config(&config), config.force) {
        output.error(&format!("Failed to write {}: {}", DEFAULT_CONFIG_FILE, e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", DEFAULT_CONFIG_FILE);

    let env_path = base_path.join(".env.example");
    if env_path.exists() && !config.force {
        output.skipped(".env.example", "already exists");
    } else if let Err(e) = write_file(&env_path, &generate_env_example(), config.force) {
        output.error(&format!("Failed to write .env.example: {}", e));
        return InitResult::Error(e.to_string());
    } else {
        output.created("env", ".env.example");
    }

    output.complete("HomeHelp is ready");
    match &config.base_url {
        Some(url) => output.kv("Backend", url),
        None => output.kv("Backend", "none (placeholder mode)"),
    }
    output.hint("Next steps:");
    output.command("homehelp login --as customer --email you@example.com");
    output.command("homehelp book");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_config(config: &InitConfig) -> String {
    let auth_line = match &config.base_url {
        Some(url) => format!("base_url = \"{}\"", url),
        None => "# base_url = \"http://localhost:6900\"".to_string(),
    };

    format!(
        r#"# HomeHelp configuration
# Every key is optional; commented values are the defaults.

[app]
# trace, debug, info, warn or error
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[auth]
# Backend root. Leave unset for placeholder mode, where sign-ins are
# answered locally. {env} overrides this value.
{auth_line}
timeout_secs = 10
# Demo helper in placeholder mode: "professional_helper" or "casual_helper"
placeholder_helper_role = "professional_helper"

[storage]
# Session tokens of both areas
token_file = ".homehelp/tokens.json"

[timing]
# Delays are in milliseconds, at most one day each
# Counterpart follow-up after a chat opens
chat_follow_up_ms = 3000
# Canned replies arrive after a random delay in this range
reply_delay_min_ms = 1000
reply_delay_max_ms = 3000
# First job offer after the helper dashboard opens
offer_delay_ms = 3000
# Confirmation screen before returning to the dashboard
booking_redirect_ms = 3000
"#,
        env = BASE_URL_ENV,
        auth_line = auth_line,
    )
}

fn generate_env_example() -> String {
    format!(
        r#"# Copy to .env and adjust.

# Backend root; overrides [auth] base_url
# {env}=http://localhost:6900

# Password for login/register, so it stays out of shell history
# HOMEHELP_PASSWORD=

# Log filter, wins over [app] log_level
# RUST_LOG=homehelp=debug,homehelp_core=debug
"#,
        env = BASE_URL_ENV
    )
}
