//! Crate-level error type.
//!
//! Combinator failures are never wrapped: a rejected element or callback
//! surfaces as the caller's own error value, and the generic combinator
//! errors ([`AnyError`](crate::combinator::AnyError),
//! [`Unwind`](crate::scope::Unwind)) carry it untouched. This type only covers
//! failures of the crate's own machinery, currently configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`CombinatorConfig`](crate::config::CombinatorConfig).
#[derive(Debug, Error)]
pub enum Error {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value for {var}: {message}")]
    InvalidEnv {
        /// The offending variable.
        var: &'static str,
        /// What was expected and what was found.
        message: String,
    },
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for this crate.
    #[error("failed to parse TOML config: {0}")]
    ConfigParse(String),
}

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, Error>;
