//! Configuration module
//!
//! Loads `AppConfig` from a TOML file. Every section has serde defaults so
//! a partial file (or none at all) still yields a runnable configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub payment: PaymentSection,
    pub booking: BookingSection,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 10,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite database file path
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./bookings.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter, e.g. "info" or "stayvia_booking=debug,info"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Payment provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentSection {
    /// Provider API base URL
    pub provider_base_url: String,
    /// Secret API key for outbound verification calls
    pub secret_key: String,
    /// Shared secret for inbound webhook HMAC verification
    pub webhook_secret: String,
}

impl Default for PaymentSection {
    fn default() -> Self {
        Self {
            provider_base_url: "https://api.paystack.co".to_string(),
            secret_key: String::new(),
            webhook_secret: String::new(),
        }
    }
}

/// Booking engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingSection {
    /// Currency all stays are charged in (ISO 4217)
    pub currency: String,
    /// Bound on waiting for a unit's admission lock, in milliseconds
    pub lock_timeout_ms: u64,
}

impl Default for BookingSection {
    fn default() -> Self {
        Self {
            currency: "NGN".to_string(),
            lock_timeout_ms: 5_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config file path: `<platform config dir>/stayvia-booking/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stayvia-booking")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.booking.currency, "NGN");
        assert_eq!(cfg.booking.lock_timeout_ms, 5_000);
        assert!(cfg.database.connection_url().starts_with("sqlite://"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9090

            [payment]
            webhook_secret = "wh_secret"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.payment.webhook_secret, "wh_secret");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = toml::from_str::<AppConfig>("server = 5").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
