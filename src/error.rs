//! Error types for request-intl.
//!
//! Only configuration and CLI problems ever reach a caller. Remote load
//! failures are recorded here so they can be logged with structure, but the
//! formatter cache recovers from them instead of failing the request.

use std::io;
use thiserror::Error;

/// Boxed error returned by integrator-supplied message loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (bad accept list, zero cache size, unparsable locale).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A remote message loader failed for one `(locale, module)` pair.
    #[error("Failed to load messages for {locale}:{module}: {source}")]
    RemoteLoad {
        /// Locale that was requested.
        locale: String,
        /// Module that was requested.
        module: String,
        /// Underlying loader error.
        #[source]
        source: BoxError,
    },

    /// IO error (config file access).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON config file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the exit code for this error type.
    ///
    /// - 1: General error
    /// - 2: Invalid or unparsable configuration, or invalid arguments
    /// - 10: IO error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidArgument(_) | Self::Json(_) | Self::Yaml(_) => 2,
            Self::Io(_) => 10,
            Self::RemoteLoad { .. } => 1,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Wrap a loader failure for the given pair.
    pub fn remote_load(
        locale: impl Into<String>,
        module: impl Into<String>,
        source: BoxError,
    ) -> Self {
        Self::RemoteLoad { locale: locale.into(), module: module.into(), source }
    }
}
