//! # HomeHelp
//!
//! Native client for the HomeHelp home-services marketplace: customers book
//! helpers (plumbing, cleaning, ...), helpers receive job offers, and both
//! sides chat.
//!
//! The domain itself (sessions, booking wizard, simulated chat, offer inbox)
//! lives in [`homehelp_core`]. This crate adds what a native host needs:
//!
//! - [`utils::toml_config`] - `homehelp.toml` loading and validation
//! - [`auth`] - HTTP and placeholder auth clients, [`SessionHolder`]
//! - [`storage`] - token file shared by both session contexts
//! - [`runtime`] - [`ViewDriver`], the tokio task advancing a view's timers
//! - [`cli`] - the `homehelp` command line front-end
//!
//! ## Library usage
//!
//! ```rust,ignore
//! use homehelp::{AppState, HomeHelpConfig};
//! use homehelp_core::SessionContext;
//!
//! let config = HomeHelpConfig::load_or_default("homehelp.toml")?;
//! let mut state = AppState::start(config)?;
//!
//! let customer = state.session_mut(SessionContext::Customer);
//! if !customer.login("asha@example.com", "secret").await {
//!     eprintln!("{}", customer.last_error().unwrap_or_default());
//! }
//! state.shutdown();
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

/// Authentication clients and session holders.
pub mod auth;
/// Command line interface.
pub mod cli;
/// Tokio driver for timer-backed views.
pub mod runtime;
/// Token persistence.
pub mod storage;
/// Wire types and error handling.
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthClient, HttpAuthClient, PlaceholderAuthClient, SessionHolder};
pub use runtime::ViewDriver;
pub use storage::{FileTokenStore, SharedTokenStore};
pub use types::{AppError, Result};
pub use utils::toml_config::{HomeHelpConfig, LogFormat};

use homehelp_core::{SessionContext, Timings};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Session holder as used by the application.
pub type AppSession = SessionHolder<Arc<dyn AuthClient>, SharedTokenStore<FileTokenStore>>;

/// Application state: configuration plus one session per role context.
///
/// Created once at start-up and handed to whatever needs it; there is no
/// global session.
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<HomeHelpConfig>,
    customer: AppSession,
    helper: AppSession,
}

impl AppState {
    /// Build the state from configuration: HTTP auth when a base URL is set,
    /// placeholder auth otherwise.
    pub fn start(config: HomeHelpConfig) -> Result<Self> {
        let client: Arc<dyn AuthClient> = match &config.auth.base_url {
            Some(url) => Arc::new(HttpAuthClient::new(url.clone(), config.auth_timeout())?),
            None => Arc::new(
                PlaceholderAuthClient::new().with_helper_role(config.auth.placeholder_helper_role),
            ),
        };
        Self::with_client(config, client)
    }

    /// Build the state around a given auth client.
    pub fn with_client(config: HomeHelpConfig, client: Arc<dyn AuthClient>) -> Result<Self> {
        let store = SharedTokenStore::new(FileTokenStore::open(&config.storage.token_file)?);
        tracing::info!(
            placeholder = config.is_placeholder_mode(),
            token_file = %config.storage.token_file.display(),
            "app state started"
        );
        Ok(Self {
            customer: SessionHolder::new(SessionContext::Customer, Arc::clone(&client), store.clone()),
            helper: SessionHolder::new(SessionContext::Helper, client, store),
            config: Arc::new(config),
        })
    }

    pub fn session(&self, context: SessionContext) -> &AppSession {
        match context {
            SessionContext::Customer => &self.customer,
            SessionContext::Helper => &self.helper,
        }
    }

    pub fn session_mut(&mut self, context: SessionContext) -> &mut AppSession {
        match context {
            SessionContext::Customer => &mut self.customer,
            SessionContext::Helper => &mut self.helper,
        }
    }

    pub fn timings(&self) -> Timings {
        self.config.timings()
    }

    /// Tear the state down. Stored tokens are kept for the next start.
    pub fn shutdown(self) {
        tracing::info!(
            customer_active = self.customer.is_active(),
            helper_active = self.helper.is_active(),
            "app state stopped"
        );
    }
}

/// Load `.env` from the working directory if there is one.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), ".env loaded");
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; `verbose` forces `debug`.
pub fn init_tracing(app: &utils::toml_config::AppConfig, verbose: bool) {
    let level = if verbose { "debug" } else { app.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("homehelp={level},homehelp_core={level}")));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
