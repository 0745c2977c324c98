//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GLOWCART_SOURCE` - Where products come from: `fixture` (default, the
//!   bundled demo catalog), a path to a JSON file, or an `http(s)://` base
//!   URL of a catalog API
//! - `GLOWCART_API_TOKEN` - Bearer token for an HTTP source
//! - `GLOWCART_ADMIN` - Set to `1`/`true` to enable admin commands
//! - `GLOWCART_REFRESH_SECS` - Watch-loop refresh interval (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default refresh interval for the watch loop, matching the storefront's
/// five-minute auto-refresh.
pub const DEFAULT_REFRESH_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the product list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// The bundled demo catalog.
    Fixture,
    /// A JSON file holding a product array.
    Path(PathBuf),
    /// A remote catalog API base URL.
    Url(String),
}

/// CLI application configuration.
#[derive(Debug)]
pub struct CliConfig {
    /// Product source selection.
    pub source: SourceSpec,
    /// Bearer token for an HTTP source.
    pub api_token: Option<SecretString>,
    /// Whether admin commands are enabled.
    pub admin: bool,
    /// Watch-loop refresh interval.
    pub refresh_interval: Duration,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let source = std::env::var("GLOWCART_SOURCE")
            .map_or(SourceSpec::Fixture, |raw| parse_source_spec(&raw));

        let api_token = std::env::var("GLOWCART_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .map(SecretString::from);

        let admin = std::env::var("GLOWCART_ADMIN").is_ok_and(|raw| parse_flag(&raw));

        let refresh_secs = match std::env::var("GLOWCART_REFRESH_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("GLOWCART_REFRESH_SECS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_REFRESH_SECS,
        };

        Ok(Self {
            source,
            api_token,
            admin,
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }
}

fn parse_source_spec(raw: &str) -> SourceSpec {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("fixture") {
        SourceSpec::Fixture
    } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        SourceSpec::Url(trimmed.to_string())
    } else {
        SourceSpec::Path(PathBuf::from(trimmed))
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
