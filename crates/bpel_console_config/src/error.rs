//! Error types for loading the console record.

use crate::source::ConfigFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Console configuration result type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Console configuration errors.
///
/// Every variant is fatal at start-up: the console cannot run without its
/// branding record.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension does not map to a known format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Syntax or shape error in the source text
    #[error("Malformed {format} config: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    /// Rendering the record failed
    #[error("Failed to render {format} config: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    #[error("requiresLogin must be \"true\" or \"false\", got {0:?}")]
    InvalidRequiresLogin(String),

    #[error("Invalid serverWebContext {0:?}: expected an absolute path segment like \"/bpel-console\"")]
    InvalidWebContext(String),

    #[error("Invalid defaultEditor {0:?}: expected a dotted component identifier")]
    InvalidEditorId(String),

    /// The global record was already set
    #[error("Console configuration already installed")]
    AlreadyInstalled,
}

impl ConfigError {
    /// Create a parse error.
    pub fn parse(format: ConfigFormat, msg: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: msg.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialize(format: ConfigFormat, msg: impl Into<String>) -> Self {
        Self::Serialize {
            format,
            message: msg.into(),
        }
    }

    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
