//! Reloading `bpel-console.properties` from disk.

use bpel_console_proxy::{keys, ConfigLocation, ProxyError, RefreshingProperties};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

struct TestEnv {
    _temp: TempDir,
    path: PathBuf,
}

impl TestEnv {
    fn new(content: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join(keys::DEFAULT_PROPERTIES_FILE);
        let env = Self { _temp: temp, path };
        env.write(content, 1_000);
        env
    }

    /// Write and pin the mtime so changes are visible regardless of
    /// filesystem timestamp granularity.
    fn write(&self, content: &str, mtime_secs: i64) {
        fs::write(&self.path, content).expect("Failed to write properties");
        set_file_mtime(&self.path, FileTime::from_unix_time(mtime_secs, 0))
            .expect("Failed to set mtime");
    }

    fn location(&self, delay: Duration) -> ConfigLocation {
        ConfigLocation {
            path: self.path.clone(),
            refresh_delay: delay,
        }
    }
}

#[test]
fn test_reloads_changed_file() {
    let env = TestEnv::new("bpel-console.rest-proxy.proxy-url=http://one/\n");
    let props = RefreshingProperties::open(env.location(Duration::ZERO)).unwrap();
    assert_eq!(props.snapshot().get(keys::PROXY_URL), Some("http://one/"));

    env.write("bpel-console.rest-proxy.proxy-url=http://two/\n", 2_000);
    assert_eq!(props.snapshot().get(keys::PROXY_URL), Some("http://two/"));
}

#[test]
fn test_unchanged_mtime_keeps_snapshot() {
    let env = TestEnv::new("k=1\n");
    let props = RefreshingProperties::open(env.location(Duration::ZERO)).unwrap();
    let first = props.snapshot();

    env.write("k=2\n", 1_000);
    let second = props.snapshot();
    assert_eq!(second.get("k"), Some("1"));
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    // An explicit reload ignores the modification time.
    assert_eq!(props.reload().unwrap().get("k"), Some("2"));
}

#[test]
fn test_delay_suppresses_checks() {
    let env = TestEnv::new("k=1\n");
    let props = RefreshingProperties::open(env.location(Duration::from_secs(3600))).unwrap();

    env.write("k=2\n", 2_000);
    assert_eq!(props.snapshot().get("k"), Some("1"));
}

#[test]
fn test_failed_reload_keeps_previous_values() {
    let env = TestEnv::new("k=1\n");
    let props = RefreshingProperties::open(env.location(Duration::ZERO)).unwrap();

    env.write("k=\\uZZZZ\n", 2_000);
    assert_eq!(props.snapshot().get("k"), Some("1"));
    assert!(props.reload().is_err());

    fs::remove_file(&env.path).unwrap();
    assert_eq!(props.snapshot().get("k"), Some("1"));
}

#[test]
fn test_missing_file_fails_open() {
    let temp = TempDir::new().unwrap();
    let location = ConfigLocation {
        path: temp.path().join("absent.properties"),
        refresh_delay: Duration::ZERO,
    };
    assert!(matches!(
        RefreshingProperties::open(location),
        Err(ProxyError::Io { .. })
    ));
}
