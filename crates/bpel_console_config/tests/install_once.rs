//! Installing the process-wide record.
//!
//! Runs as its own test binary so the global cell starts empty.

use bpel_console_config::{console_config, install, ConfigError, ConfigFormat, ConsoleConfig};

const CUSTOM: &str = r#"{
    "profileName": "Orchestration Console",
    "logo": "app/custom_logo.png",
    "serverWebContext": "/orchestration",
    "defaultEditor": "org.example.console.DesignerModule",
    "overallReportFile": "overall.rptdesign",
    "processSummaryReportFile": "process.rptdesign",
    "instanceSummaryReportFile": "instance.rptdesign",
    "requiresLogin": "true"
}"#;

#[test]
fn test_install_then_read_then_reject_second_install() {
    let custom = ConsoleConfig::from_str_with(ConfigFormat::Json, CUSTOM).unwrap();
    let installed = install(custom.clone()).unwrap();
    assert_eq!(installed, &custom);

    let read = console_config();
    assert!(std::ptr::eq(read, installed));
    assert_eq!(read.profile_name(), "Orchestration Console");
    assert!(read.requires_login());

    let err = install(ConsoleConfig::riftsaw()).unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyInstalled));

    // Reads after the rejected install still see the first record.
    assert_eq!(console_config(), &custom);
    assert_eq!(console_config().server_web_context(), "/orchestration");
}
