#![forbid(unsafe_code)]

//! Error types.
//!
//! Runtime failures are rare by construction: a missing element disables a
//! feature and malformed project fields default to empty strings. The two
//! remaining failure sources are bad boot options and the project fetch.

use thiserror::Error;

/// Invalid boot configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options object was not valid JSON for [`crate::SiteConfig`].
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A count or duration that must be positive was zero.
    #[error("`{field}` must be at least 1")]
    ZeroValue { field: &'static str },
}

/// Failure loading the project list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a response.
    #[error("failed to load {path}: {reason}")]
    Network { path: String, reason: String },
    /// The server answered with a non-success status.
    #[error("failed to load {path}: HTTP {status}")]
    Status { path: String, status: u16 },
    /// The body was not a JSON array of project records.
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl LoadError {
    /// Path of the resource that failed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Network { path, .. } | Self::Status { path, .. } | Self::Decode { path, .. } => {
                path
            }
        }
    }
}
