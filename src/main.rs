use anyhow::{Context, Result};
use homehelp::cli::{account, book, chat, init, offers, output::Output, prompt, Cli, Commands};
use homehelp::utils::toml_config::{AppConfig, ConfigError};
use homehelp::{init_tracing, load_dotenv, AppState, HomeHelpConfig};
use homehelp_core::SessionContext;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded; failures it already reported
/// come back as `Ok(false)`.
async fn run() -> Result<bool> {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };
    load_dotenv();

    let Some(command) = cli.command else {
        output.banner();
        output.hint("Run `homehelp --help` to see the available commands");
        return Ok(true);
    };

    match command {
        Commands::Init {
            path,
            force,
            base_url,
        } => {
            init_tracing(&AppConfig::default(), cli.verbose);
            let result = init::run(
                init::InitConfig {
                    path,
                    force,
                    base_url,
                },
                &output,
            );
            Ok(result == init::InitResult::Success)
        }
        Commands::Config { full, validate } => show_config(&cli.config, full, validate, &output),
        command => {
            let config = HomeHelpConfig::load_or_default(&cli.config)
                .with_context(|| format!("failed to load {}", cli.config.display()))?;
            init_tracing(&config.app, cli.verbose);
            let mut state = AppState::start(config).context("failed to start")?;
            let ok = dispatch(command, &mut state, &output).await;
            state.shutdown();
            ok
        }
    }
}

async fn dispatch(command: Commands, state: &mut AppState, output: &Output) -> Result<bool> {
    match command {
        Commands::Login {
            context,
            email,
            password,
        } => Ok(account::login(state, context.into(), &email, &password, output).await),
        Commands::Register(args) => Ok(account::register(state, &args, output).await?),
        Commands::Logout { context } => {
            account::logout(state, context.map(SessionContext::from), output);
            Ok(true)
        }
        Commands::Whoami => {
            account::whoami(state, output);
            Ok(true)
        }
        Commands::Book { service, category } => {
            let mut input = prompt::stdin();
            let request = book::run(
                state,
                service.as_deref(),
                category.map(Into::into),
                &mut input,
                output,
            )
            .await?;
            Ok(request.is_some())
        }
        Commands::Chat { id, context } => {
            let mut input = prompt::stdin();
            chat::run(state, &id, context.into(), &mut input, output).await?;
            Ok(true)
        }
        Commands::Offers { kind } => {
            let mut input = prompt::stdin();
            offers::run(state, kind.into(), &mut input, output).await?;
            Ok(true)
        }
        Commands::Init { .. } | Commands::Config { .. } => Ok(true),
    }
}

fn show_config(path: &Path, full: bool, validate: bool, output: &Output) -> Result<bool> {
    let config = match HomeHelpConfig::load(path) {
        Ok(config) => {
            if validate {
                output.success(&format!("{} is valid", path.display()));
            }
            config
        }
        Err(ConfigError::FileNotFound(_)) => {
            if validate {
                output.error(&format!("{} not found", path.display()));
                output.hint("Create one with:");
                output.command("homehelp init");
                return Ok(false);
            }
            output.info(&format!("{} not found, using defaults", path.display()));
            HomeHelpConfig::load_or_default(path)?
        }
        Err(e) => {
            output.error(&e.to_string());
            return Ok(false);
        }
    };
    init_tracing(&config.app, false);

    output.header("Configuration");
    output.kv("File", &path.display().to_string());
    output.kv(
        "Backend",
        config
            .auth
            .base_url
            .as_deref()
            .unwrap_or("none (placeholder mode)"),
    );
    output.kv("Token file", &config.storage.token_file.display().to_string());
    output.kv("Log level", &config.app.log_level);

    if full {
        output.subheader("Effective configuration");
        println!("{}", config.to_toml_string()?);
    }
    Ok(true)
}
