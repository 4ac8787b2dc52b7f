//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `PORT` - Port to bind on all interfaces, used only when `LISTEN` is unset
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CODE_LENGTH` - Characters per short code (default: 8, range: 1-64)
//! - `MAX_GENERATION_ATTEMPTS` - Collision retry cap (default: 10, range: 1-1000)
//! - `URL_VALIDATION` - `pattern` or `strict` (default: `pattern`)
//! - `MAX_BODY_BYTES` - Request body limit for `/shorten` (default: 65536)
//!
//! None of these are required; an empty environment yields a working service.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::api::pipeline::DEFAULT_BODY_LIMIT;
use crate::application::services::link_store::DEFAULT_MAX_ATTEMPTS;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;
use crate::utils::url_validator::ValidationMode;

const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Number of hex characters in every generated code.
    pub code_length: usize,
    /// Candidates tried per create before reporting the code space as exhausted.
    pub max_generation_attempts: usize,
    pub url_validation: ValidationMode,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,
            url_validation: ValidationMode::default(),
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable or `URL_VALIDATION` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let code_length = parse_var("CODE_LENGTH", DEFAULT_CODE_LENGTH)?;
        let max_generation_attempts =
            parse_var("MAX_GENERATION_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        let max_body_bytes = parse_var("MAX_BODY_BYTES", DEFAULT_BODY_LIMIT)?;

        let url_validation = match env::var("URL_VALIDATION") {
            Ok(v) => v.parse::<ValidationMode>().map_err(anyhow::Error::msg)?,
            Err(_) => ValidationMode::default(),
        };

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            code_length,
            max_generation_attempts,
            url_validation,
            max_body_bytes,
        })
    }

    /// Resolves the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT`
    /// 3. `0.0.0.0:8080`
    fn load_listen_addr() -> String {
        if let Ok(addr) = env::var("LISTEN") {
            return addr;
        }

        match env::var("PORT") {
            Ok(port) => format!("0.0.0.0:{}", port),
            Err(_) => DEFAULT_LISTEN.to_string(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `code_length` is outside 1-64
    /// - `max_generation_attempts` is outside 1-1000
    /// - `max_body_bytes` is zero
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > 64 {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and 64, got {}",
                self.code_length
            );
        }

        if self.max_generation_attempts == 0 || self.max_generation_attempts > 1000 {
            anyhow::bail!(
                "MAX_GENERATION_ATTEMPTS must be between 1 and 1000, got {}",
                self.max_generation_attempts
            );
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Max generation attempts: {}", self.max_generation_attempts);
        tracing::info!("  URL validation: {:?}", self.url_validation);
        tracing::info!("  Max body bytes: {}", self.max_body_bytes);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `name` and parses it, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, v)),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "PORT",
        "LOG_FORMAT",
        "CODE_LENGTH",
        "MAX_GENERATION_ATTEMPTS",
        "URL_VALIDATION",
        "MAX_BODY_BYTES",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.code_length = 0;
        assert!(config.validate().is_err());

        config.code_length = 65;
        assert!(config.validate().is_err());

        config.code_length = 8;
        config.max_generation_attempts = 0;
        assert!(config.validate().is_err());

        config.max_generation_attempts = 10;
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:8080".to_string();
        config.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults_from_empty_env() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.code_length, 8);
        assert_eq!(config.max_generation_attempts, 10);
        assert_eq!(config.url_validation, ValidationMode::Pattern);
        assert_eq!(config.max_body_bytes, 64 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("CODE_LENGTH", "12");
            env::set_var("MAX_GENERATION_ATTEMPTS", "25");
            env::set_var("URL_VALIDATION", "strict");
            env::set_var("MAX_BODY_BYTES", "1024");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.code_length, 12);
        assert_eq!(config.max_generation_attempts, 25);
        assert_eq!(config.url_validation, ValidationMode::Strict);
        assert_eq!(config.max_body_bytes, 1024);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_from_env() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("CODE_LENGTH", "eight");
        }
        assert!(Config::from_env().is_err());

        clear_env();
        unsafe {
            env::set_var("URL_VALIDATION", "rfc");
        }
        assert!(Config::from_env().is_err());

        clear_env();
        unsafe {
            env::set_var("CODE_LENGTH", "100");
        }
        assert!(load_from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_listen_priority() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PORT", "9090");
        }
        assert_eq!(Config::load_listen_addr(), "0.0.0.0:9090");

        unsafe {
            env::set_var("LISTEN", "127.0.0.1:3000");
        }
        assert_eq!(Config::load_listen_addr(), "127.0.0.1:3000");

        clear_env();
    }
}
