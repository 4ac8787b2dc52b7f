//! Target URL validation.
//!
//! The store only accepts targets that pass a [`UrlValidator`]. Two
//! implementations are provided:
//!
//! - [`PatternValidator`] - a conservative shape check (default)
//! - [`StrictValidator`] - RFC 3986 parsing via the `url` crate

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

/// Scheme, host of alphanumerics/dots/hyphens, optional port, optional
/// path and query from a restricted ASCII set.
static TARGET_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[a-zA-Z0-9.-]+(:[0-9]+)?(/[A-Za-z0-9_./?%&=-]*)?$").unwrap()
});

/// Reasons a target URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidUrl {
    #[error("URL is empty")]
    Empty,

    #[error("Url validation failed")]
    Malformed,

    #[error("Invalid URL format: {0}")]
    Unparsable(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL contains control characters")]
    ControlCharacter,
}

/// Predicate deciding whether a target may be shortened.
pub trait UrlValidator: Send + Sync {
    /// Returns `Ok(())` when `candidate` is acceptable.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidUrl`] reason otherwise.
    fn validate(&self, candidate: &str) -> Result<(), InvalidUrl>;
}

/// Shape check against [`TARGET_URL_REGEX`].
///
/// # Examples
///
/// ```ignore
/// let validator = PatternValidator;
/// assert!(validator.validate("https://google.com/search?q=test").is_ok());
/// assert!(validator.validate("not-a-url").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternValidator;

impl UrlValidator for PatternValidator {
    fn validate(&self, candidate: &str) -> Result<(), InvalidUrl> {
        if candidate.is_empty() {
            return Err(InvalidUrl::Empty);
        }

        if !TARGET_URL_REGEX.is_match(candidate) {
            return Err(InvalidUrl::Malformed);
        }

        Ok(())
    }
}

/// Full URL parsing; accepts any well-formed `http`/`https` URL with a host.
///
/// More permissive than [`PatternValidator`] about paths (fragments, unicode
/// hosts, user info), stricter about structure.
///
/// The parser silently strips tabs and newlines, but the store keeps the
/// target verbatim and later sends it as a `Location` header, so control
/// characters are rejected before parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictValidator;

impl UrlValidator for StrictValidator {
    fn validate(&self, candidate: &str) -> Result<(), InvalidUrl> {
        if candidate.is_empty() {
            return Err(InvalidUrl::Empty);
        }

        if candidate.chars().any(char::is_control) {
            return Err(InvalidUrl::ControlCharacter);
        }

        let url = Url::parse(candidate).map_err(|e| InvalidUrl::Unparsable(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(InvalidUrl::UnsupportedProtocol),
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(()),
            _ => Err(InvalidUrl::MissingHost),
        }
    }
}

/// Selects which [`UrlValidator`] the store is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    #[default]
    Pattern,
    Strict,
}

impl ValidationMode {
    /// Builds the validator for this mode.
    pub fn validator(self) -> Box<dyn UrlValidator> {
        match self {
            Self::Pattern => Box::new(PatternValidator),
            Self::Strict => Box::new(StrictValidator),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pattern" => Ok(Self::Pattern),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "URL_VALIDATION must be 'pattern' or 'strict', got '{}'",
                other
            )),
        }
    }
}
