//! Process-wide console record.
//!
//! The record is set at most once, before readers start. After that every
//! reader gets the same `&'static` value without locking.

use crate::error::{ConfigError, Result};
use crate::record::ConsoleConfig;
use std::path::Path;
use std::sync::OnceLock;

static CONSOLE_CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

/// Install the process-wide record.
///
/// Fails with [`ConfigError::AlreadyInstalled`] if a record was installed
/// earlier or [`console_config`] already pinned the built-in profile.
pub fn install(config: ConsoleConfig) -> Result<&'static ConsoleConfig> {
    let mut installed = false;
    let current = CONSOLE_CONFIG.get_or_init(|| {
        installed = true;
        config
    });
    if !installed {
        tracing::warn!(
            profile = current.profile_name(),
            "Console configuration already installed"
        );
        return Err(ConfigError::AlreadyInstalled);
    }
    tracing::debug!(profile = current.profile_name(), "Installed console configuration");
    Ok(current)
}

/// Load a record from `path` and install it.
pub fn install_from_path(path: &Path) -> Result<&'static ConsoleConfig> {
    install(ConsoleConfig::load(path)?)
}

/// The process-wide record, or the built-in riftsaw profile when nothing
/// was installed.
pub fn console_config() -> &'static ConsoleConfig {
    CONSOLE_CONFIG.get_or_init(ConsoleConfig::riftsaw)
}
