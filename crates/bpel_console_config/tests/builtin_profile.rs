//! Reading the process-wide record without installing one.

use bpel_console_config::{console_config, install, ConfigError, ConsoleConfig};
use std::thread;

#[test]
fn test_builtin_profile_is_pinned_on_first_read() {
    let config = console_config();
    assert_eq!(config.profile_name(), "BPEL Console");
    assert_eq!(config.server_web_context(), "/bpel-console");
    assert_eq!(config.requires_login_flag().as_str(), "false");

    let readers: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| console_config() as *const ConsoleConfig as usize))
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), config as *const ConsoleConfig as usize);
    }

    let err = install(ConsoleConfig::riftsaw()).unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyInstalled));
}
