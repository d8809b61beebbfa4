//! CLI module for HomeHelp
//!
//! Provides command-line interface parsing and handling for the homehelp binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod account;
pub mod book;
pub mod chat;
pub mod init;
pub mod offers;
pub mod output;
pub mod prompt;

use clap::{Parser, Subcommand, ValueEnum};
use homehelp_core::{Role, ServiceCategory, SessionContext, Urgency};
use std::path::PathBuf;

/// HomeHelp - book trusted helpers, or work as one
///
/// Command line front-end for the HomeHelp marketplace: sign in as a
/// customer or helper, book a service, chat, and answer job offers.
#[derive(Parser, Debug)]
#[command(
    name = "homehelp",
    version,
    about = "HomeHelp - home services marketplace client",
    long_about = "Command line front-end for the HomeHelp marketplace.\n\n\
                  Without [auth] base_url in homehelp.toml the client runs in placeholder\n\
                  mode: sign-ins are answered locally and nothing leaves the machine.",
    after_help = "EXAMPLES:\n    \
                  homehelp init                                   # Write a default homehelp.toml\n    \
                  homehelp login --as customer -e asha@example.com  # Sign in as a customer\n    \
                  homehelp book --service Plumbing                # Book a service\n    \
                  homehelp offers --kind casual                   # Wait for job offers\n    \
                  homehelp chat new-client --as helper            # Open a chat"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "homehelp.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Session area on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContextArg {
    Customer,
    Helper,
}

impl From<ContextArg> for SessionContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Customer => SessionContext::Customer,
            ContextArg::Helper => SessionContext::Helper,
        }
    }
}

/// Account type for registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Customer,
    Professional,
    Casual,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Customer => Role::Customer,
            RoleArg::Professional => Role::ProfessionalHelper,
            RoleArg::Casual => Role::CasualHelper,
        }
    }
}

/// Helper kind, deciding which offers arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HelperKindArg {
    Professional,
    Casual,
}

impl From<HelperKindArg> for ServiceCategory {
    fn from(arg: HelperKindArg) -> Self {
        match arg {
            HelperKindArg::Professional => ServiceCategory::Professional,
            HelperKindArg::Casual => ServiceCategory::Casual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Professional,
    Casual,
}

impl From<CategoryArg> for ServiceCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Professional => ServiceCategory::Professional,
            CategoryArg::Casual => ServiceCategory::Casual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UrgencyArg {
    Low,
    Medium,
    High,
    Emergency,
}

impl From<UrgencyArg> for Urgency {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Low => Urgency::Low,
            UrgencyArg::Medium => Urgency::Medium,
            UrgencyArg::High => Urgency::High,
            UrgencyArg::Emergency => Urgency::Emergency,
        }
    }
}

/// Registration fields. Helper-only fields are ignored for customers.
#[derive(clap::Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Account type
    #[arg(long = "as", value_enum)]
    pub role: RoleArg,

    /// Full name
    #[arg(long)]
    pub name: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(short, long, env = "HOMEHELP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password confirmation (customers); defaults to --password
    #[arg(long)]
    pub confirm_password: Option<String>,

    /// Home address (helpers)
    #[arg(long)]
    pub address: Option<String>,

    /// Trade, e.g. Plumber (professional helpers)
    #[arg(long)]
    pub profession: Option<String>,

    /// Aadhar number (helpers)
    #[arg(long)]
    pub aadhar: Option<String>,

    /// Profile photo file (helpers)
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default homehelp.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Backend base URL; omit for placeholder mode
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show configuration information
    Config {
        /// Print the effective configuration as TOML
        #[arg(short = 'f', long)]
        full: bool,

        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Sign in to the customer or helper area
    Login {
        #[arg(long = "as", value_enum)]
        context: ContextArg,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "HOMEHELP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register(RegisterArgs),

    /// Sign out (both areas unless --as is given)
    Logout {
        #[arg(long = "as", value_enum)]
        context: Option<ContextArg>,
    },

    /// Show which areas hold a session token
    Whoami,

    /// Book a service (interactive)
    Book {
        /// Preselect a service, as the dashboard search does
        #[arg(short, long)]
        service: Option<String>,

        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// Open a chat (interactive; /quit to leave)
    Chat {
        /// Conversation id
        id: String,

        #[arg(long = "as", value_enum, default_value = "customer")]
        context: ContextArg,
    },

    /// Wait for job offers as a helper (interactive)
    Offers {
        #[arg(long, value_enum, default_value = "professional")]
        kind: HelperKindArg,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
