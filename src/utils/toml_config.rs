//! TOML-based configuration for HomeHelp
//!
//! Settings live in `homehelp.toml`. Every section and key is optional; a
//! missing file or section falls back to the defaults below. The auth base
//! URL can be overridden with `HOMEHELP_AUTH_BASE_URL` (a `.env` file is
//! honoured, see [`crate::load_dotenv`]).

use homehelp_core::{Role, Timings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable overriding `[auth] base_url`.
pub const BASE_URL_ENV: &str = "HOMEHELP_AUTH_BASE_URL";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "homehelp.toml";

/// Root configuration structure loaded from homehelp.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeHelpConfig {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub timing: TimingConfig,
}

// ============= App Configuration =============

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Auth Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Backend root, e.g. `http://localhost:6900`. Unset means placeholder
    /// mode: actors are fabricated locally and nothing leaves the machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Role of the demo helper in placeholder mode.
    #[serde(default = "default_placeholder_helper_role")]
    pub placeholder_helper_role: Role,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_placeholder_helper_role() -> Role {
    Role::ProfessionalHelper
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            placeholder_helper_role: default_placeholder_helper_role(),
        }
    }
}

// ============= Storage Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the session tokens.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".homehelp/tokens.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

// ============= Timing Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_chat_follow_up_ms")]
    pub chat_follow_up_ms: u64,

    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,

    #[serde(default = "default_offer_delay_ms")]
    pub offer_delay_ms: u64,

    #[serde(default = "default_booking_redirect_ms")]
    pub booking_redirect_ms: u64,
}

fn default_chat_follow_up_ms() -> u64 {
    3000
}

fn default_reply_delay_min_ms() -> u64 {
    1000
}

fn default_reply_delay_max_ms() -> u64 {
    3000
}

fn default_offer_delay_ms() -> u64 {
    3000
}

fn default_booking_redirect_ms() -> u64 {
    3000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chat_follow_up_ms: default_chat_follow_up_ms(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            offer_delay_ms: default_offer_delay_ms(),
            booking_redirect_ms: default_booking_redirect_ms(),
        }
    }
}

impl TimingConfig {
    /// Delays in the form the flows take them.
    pub fn timings(&self) -> Timings {
        Timings {
            chat_follow_up: Duration::from_millis(self.chat_follow_up_ms),
            reply_delay_min: Duration::from_millis(self.reply_delay_min_ms),
            reply_delay_max: Duration::from_millis(self.reply_delay_max_ms),
            offer_delay: Duration::from_millis(self.offer_delay_ms),
            booking_redirect: Duration::from_millis(self.booking_redirect_ms),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Longest accepted `[timing]` delay: one day.
pub const MAX_DELAY_MS: u64 = 24 * 60 * 60 * 1000;

impl HomeHelpConfig {
    /// Load configuration from a TOML file, apply environment overrides and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut config: HomeHelpConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        info!(path = %path.display(), placeholder = config.is_placeholder_mode(), "configuration loaded");
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::FileNotFound(missing)) => {
                debug!(path = %missing.display(), "no configuration file, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// Apply `HOMEHELP_AUTH_BASE_URL` if it is set and not blank.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            self.apply_base_url_override(&url);
        }
    }

    fn apply_base_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            debug!(base_url = url, "auth base url overridden from environment");
            self.auth.base_url = Some(url.to_string());
        }
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.app.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "app.log_level '{}' must be one of {}",
                self.app.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if let Some(url) = &self.auth.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!(
                    "auth.base_url '{}' must start with http:// or https://",
                    url
                )));
            }
        }

        if self.auth.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "auth.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !self.auth.placeholder_helper_role.is_helper() {
            return Err(ConfigError::ValidationError(format!(
                "auth.placeholder_helper_role must be a helper role, got '{}'",
                self.auth.placeholder_helper_role
            )));
        }

        if self.storage.token_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.token_file must not be empty".to_string(),
            ));
        }

        let t = &self.timing;
        for (key, value) in [
            ("chat_follow_up_ms", t.chat_follow_up_ms),
            ("reply_delay_min_ms", t.reply_delay_min_ms),
            ("reply_delay_max_ms", t.reply_delay_max_ms),
            ("offer_delay_ms", t.offer_delay_ms),
            ("booking_redirect_ms", t.booking_redirect_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::ValidationError(format!(
                    "timing.{} ({}) exceeds {} ms",
                    key, value, MAX_DELAY_MS
                )));
            }
        }

        if self.timing.reply_delay_max_ms < self.timing.reply_delay_min_ms {
            return Err(ConfigError::ValidationError(format!(
                "timing.reply_delay_max_ms ({}) is below timing.reply_delay_min_ms ({})",
                self.timing.reply_delay_max_ms, self.timing.reply_delay_min_ms
            )));
        }

        Ok(())
    }

    /// No backend configured: auth calls are answered locally.
    pub fn is_placeholder_mode(&self) -> bool {
        self.auth.base_url.is_none()
    }

    pub fn timings(&self) -> Timings {
        self.timing.timings()
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth.timeout_secs)
    }

    /// Render back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[app]
log_level = "debug"
log_format = "json"

[auth]
base_url = "http://localhost:6900"
timeout_secs = 5

[storage]
token_file = "/tmp/homehelp/tokens.json"

[timing]
reply_delay_min_ms = 200
reply_delay_max_ms = 400
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config: HomeHelpConfig =
            toml::from_str(&create_test_config()).expect("Failed to parse config");

        assert_eq!(config.app.log_level, "debug");
        assert_eq!(config.app.log_format, LogFormat::Json);
        assert_eq!(config.auth.base_url.as_deref(), Some("http://localhost:6900"));
        assert_eq!(config.auth.timeout_secs, 5);
        assert_eq!(config.timing.reply_delay_min_ms, 200);
        // Unspecified keys keep their defaults
        assert_eq!(config.timing.offer_delay_ms, 3000);
        assert!(!config.is_placeholder_mode());
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_file_is_placeholder_mode() {
        let config: HomeHelpConfig = toml::from_str("").unwrap();
        assert_eq!(config, HomeHelpConfig::default());
        assert!(config.is_placeholder_mode());
        assert_eq!(config.timings(), Timings::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = HomeHelpConfig::default();
        config.app.log_level = "loud".into();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = HomeHelpConfig::default();
        config.auth.base_url = Some("localhost:6900".into());
        assert!(config.validate().is_err());

        let mut config = HomeHelpConfig::default();
        config.timing.reply_delay_min_ms = 5000;
        assert!(config.validate().is_err());

        let mut config = HomeHelpConfig::default();
        config.auth.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = HomeHelpConfig::default();
        config.auth.placeholder_helper_role = Role::Customer;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_delay_is_rejected() {
        let config: HomeHelpConfig =
            toml::from_str("[timing]\nchat_follow_up_ms = 9223372036854775807\n").unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timing.chat_follow_up_ms"));

        let mut config = HomeHelpConfig::default();
        config.timing.offer_delay_ms = MAX_DELAY_MS;
        config.validate().unwrap();
    }

    #[test]
    fn test_placeholder_helper_role() {
        let config: HomeHelpConfig = toml::from_str("").unwrap();
        assert_eq!(config.auth.placeholder_helper_role, Role::ProfessionalHelper);

        let config: HomeHelpConfig =
            toml::from_str("[auth]\nplaceholder_helper_role = \"casual_helper\"\n").unwrap();
        assert_eq!(config.auth.placeholder_helper_role, Role::CasualHelper);
        config.validate().unwrap();
    }

    #[test]
    fn test_base_url_override_ignores_blank() {
        let mut config = HomeHelpConfig::default();
        config.apply_base_url_override("   ");
        assert!(config.is_placeholder_mode());

        config.apply_base_url_override("https://api.homehelp.in");
        assert_eq!(config.auth.base_url.as_deref(), Some("https://api.homehelp.in"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config: HomeHelpConfig = toml::from_str(&create_test_config()).unwrap();
        let rendered = config.to_toml_string().unwrap();
        let reparsed: HomeHelpConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed, config);
    }
}
