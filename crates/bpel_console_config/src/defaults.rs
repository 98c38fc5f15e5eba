//! Values of the riftsaw console profile.

pub const PROFILE_NAME: &str = "BPEL Console";
pub const LOGO: &str = "app/riftsaw_logo.png";
pub const SERVER_WEB_CONTEXT: &str = "/bpel-console";
pub const DEFAULT_EDITOR: &str = "org.jboss.bpm.console.client.process.ProcessModule";
pub const OVERALL_REPORT_FILE: &str = "overall_activity.rptdesign";
pub const PROCESS_SUMMARY_REPORT_FILE: &str = "process_summary.rptdesign";
pub const INSTANCE_SUMMARY_REPORT_FILE: &str = "instance_summary.rptdesign";
pub const REQUIRES_LOGIN: &str = "false";

/// Variable name the front-end looks up in `console.config.js`.
pub const SCRIPT_VARIABLE: &str = "consoleConfig";
