//! Error types for Lustre operations.
//!
//! This module defines the main error type [`LustreError`]. Errors only arise at
//! the I/O edges of the pipeline: fetching article pages, reading article JSON,
//! and loading configuration. The enrichment steps themselves never fail; they
//! leave their input unchanged when the markup is ambiguous.
//!
//! # Example
//!
//! ```rust
//! use lustre_core::{LustreError, Result};
//!
//! fn read_link(link: &str) -> Result<&str> {
//!     if link.is_empty() {
//!         return Err(LustreError::InvalidUrl("empty link".to_string()));
//!     }
//!     Ok(link)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetch, I/O and configuration failures.
///
/// # Example
///
/// ```rust
/// use lustre_core::LustreError;
///
/// let err = LustreError::HttpStatus { status: 403, url: "https://example.com/a".to_string() };
/// assert!(err.to_string().contains("403"));
/// ```
#[derive(Error, Debug)]
pub enum LustreError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status.
    ///
    /// Anti-bot interstitials and paywalls usually land here.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The server answered with an empty body.
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Configuration errors.
    ///
    /// Returned when a configuration file is missing or holds invalid JSON.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Article JSON could not be (de)serialized.
    #[error("Invalid article JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for LustreError.
pub type Result<T> = std::result::Result<T, LustreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LustreError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_http_status_error() {
        let err = LustreError::HttpStatus { status: 503, url: "https://example.com".to_string() };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("example.com"));
    }

    #[test]
    fn test_timeout_error() {
        let err = LustreError::Timeout { timeout: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_json_error_from() {
        let err: LustreError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, LustreError::JsonError(_)));
    }
}
