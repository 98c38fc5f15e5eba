//! BPEL Console configuration record.
//!
//! The console front-end reads a flat record of branding and routing
//! constants once at start-up: product name, logo, web context, default
//! editor module, report templates and the login flag.
//!
//! ```text
//! console.config.js ─┐
//! console.json ──────┼──▶ RawConsoleConfig ──▶ validate ──▶ ConsoleConfig ──▶ install / console_config()
//! console.toml ──────┘
//! ```
//!
//! Without an installed record, [`console_config`] returns the built-in
//! riftsaw profile.

pub mod defaults;
pub mod error;
pub mod global;
pub mod record;
pub mod source;
pub mod validate;

pub use error::{ConfigError, Result};
pub use global::{console_config, install, install_from_path};
pub use record::{ConsoleConfig, RequiresLogin, FIELD_NAMES};
pub use source::ConfigFormat;
