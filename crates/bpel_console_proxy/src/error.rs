//! Error types for properties loading and proxy planning.

use std::path::PathBuf;
use thiserror::Error;

/// Proxy result type.
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Proxy configuration and planning errors.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The properties file could not be read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed properties text
    #[error("Invalid properties at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("Missing config property: {0}")]
    MissingProperty(String),

    #[error("Unknown authentication provider: {0}")]
    UnknownAuthProvider(String),

    #[error("Invalid refresh delay {0:?}: expected milliseconds")]
    InvalidRefreshDelay(String),

    #[error("Invalid proxy URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// SAML provider selected but no assertion issuer was supplied
    #[error("SAML bearer-token authentication requires an assertion issuer")]
    MissingAssertionIssuer,

    /// The assertion issuer failed to create or sign an assertion
    #[error("SAML assertion error: {0}")]
    Assertion(String),
}

impl ProxyError {
    /// Create a missing property error.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingProperty(key.into())
    }

    /// Create an assertion error.
    pub fn assertion(msg: impl Into<String>) -> Self {
        Self::Assertion(msg.into())
    }

    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
