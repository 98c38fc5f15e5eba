//! Locating `bpel-console.properties` and re-reading it when it changes.

use crate::error::{ProxyError, Result};
use crate::keys;
use crate::properties::Properties;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

/// Where the properties file lives and how often to check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub refresh_delay: Duration,
}

impl ConfigLocation {
    /// Resolve from `BPEL_CONSOLE_CONFIG_FILE` and
    /// `BPEL_CONSOLE_CONFIG_REFRESH`, defaulting to
    /// `<default_dir>/bpel-console.properties` every 5 seconds.
    pub fn from_env(default_dir: &Path) -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok(), default_dir)
    }

    /// Same as [`ConfigLocation::from_env`] with an explicit variable lookup.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>, default_dir: &Path) -> Result<Self> {
        let path = lookup(keys::CONFIG_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_dir.join(keys::DEFAULT_PROPERTIES_FILE));
        let refresh_millis = match lookup(keys::CONFIG_REFRESH_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ProxyError::InvalidRefreshDelay(raw.clone()))?,
            None => keys::DEFAULT_REFRESH_MILLIS,
        };
        Ok(Self {
            path,
            refresh_delay: Duration::from_millis(refresh_millis),
        })
    }
}

struct RefreshState {
    snapshot: Arc<Properties>,
    modified: Option<SystemTime>,
    last_check: Instant,
}

/// Properties file that is re-read when it changes on disk.
///
/// At most one modification check per refresh delay. A failed reload keeps
/// serving the previous snapshot.
pub struct RefreshingProperties {
    path: PathBuf,
    refresh_delay: Duration,
    state: Mutex<RefreshState>,
}

impl RefreshingProperties {
    /// Read the file once. A missing or malformed file is an error here.
    pub fn open(location: ConfigLocation) -> Result<Self> {
        let modified = modified_time(&location.path);
        let snapshot = Properties::load(&location.path)?;
        tracing::info!(
            path = %location.path.display(),
            entries = snapshot.len(),
            refresh_ms = location.refresh_delay.as_millis() as u64,
            "Loaded console properties"
        );
        Ok(Self {
            path: location.path,
            refresh_delay: location.refresh_delay,
            state: Mutex::new(RefreshState {
                snapshot: Arc::new(snapshot),
                modified,
                last_check: Instant::now(),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current properties, re-read first if the delay elapsed and the
    /// file's modification time changed.
    pub fn snapshot(&self) -> Arc<Properties> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.last_check.elapsed() < self.refresh_delay {
            return Arc::clone(&state.snapshot);
        }
        state.last_check = Instant::now();

        let modified = modified_time(&self.path);
        if modified == state.modified {
            return Arc::clone(&state.snapshot);
        }

        match Properties::load(&self.path) {
            Ok(props) => {
                tracing::info!(
                    path = %self.path.display(),
                    entries = props.len(),
                    "Reloaded console properties"
                );
                state.snapshot = Arc::new(props);
                state.modified = modified;
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to reload console properties; keeping previous values"
                );
            }
        }
        Arc::clone(&state.snapshot)
    }

    /// Re-read the file now, regardless of delay or modification time.
    pub fn reload(&self) -> Result<Arc<Properties>> {
        let modified = modified_time(&self.path);
        let props = Arc::new(Properties::load(&self.path)?);
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.snapshot = Arc::clone(&props);
        state.modified = modified;
        state.last_check = Instant::now();
        Ok(props)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
