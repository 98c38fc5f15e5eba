//! The console record and its login flag.

use crate::defaults;
use crate::error::{ConfigError, Result};
use crate::validate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire names of the record fields, in canonical order.
pub const FIELD_NAMES: [&str; 8] = [
    "profileName",
    "logo",
    "serverWebContext",
    "defaultEditor",
    "overallReportFile",
    "processSummaryReportFile",
    "instanceSummaryReportFile",
    "requiresLogin",
];

/// Whether the console enforces authentication.
///
/// Consumers read this as the string `"true"` or `"false"`, so it always
/// serializes as one of those literals. Only those two literals parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequiresLogin(bool);

impl RequiresLogin {
    pub const fn new(required: bool) -> Self {
        Self(required)
    }

    pub const fn get(self) -> bool {
        self.0
    }

    pub const fn as_str(self) -> &'static str {
        if self.0 {
            "true"
        } else {
            "false"
        }
    }
}

impl From<bool> for RequiresLogin {
    fn from(required: bool) -> Self {
        Self(required)
    }
}

impl FromStr for RequiresLogin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "true" => Ok(Self(true)),
            "false" => Ok(Self(false)),
            other => Err(ConfigError::InvalidRequiresLogin(other.to_string())),
        }
    }
}

impl fmt::Display for RequiresLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RequiresLogin {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequiresLogin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Branding and routing record for the console front-end.
///
/// Fields are private: a record is built once by a loader and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawConsoleConfig")]
pub struct ConsoleConfig {
    profile_name: String,
    logo: String,
    server_web_context: String,
    default_editor: String,
    overall_report_file: String,
    process_summary_report_file: String,
    instance_summary_report_file: String,
    requires_login: RequiresLogin,
}

impl ConsoleConfig {
    /// The riftsaw profile shipped with the console.
    pub fn riftsaw() -> Self {
        Self {
            profile_name: defaults::PROFILE_NAME.to_string(),
            logo: defaults::LOGO.to_string(),
            server_web_context: defaults::SERVER_WEB_CONTEXT.to_string(),
            default_editor: defaults::DEFAULT_EDITOR.to_string(),
            overall_report_file: defaults::OVERALL_REPORT_FILE.to_string(),
            process_summary_report_file: defaults::PROCESS_SUMMARY_REPORT_FILE.to_string(),
            instance_summary_report_file: defaults::INSTANCE_SUMMARY_REPORT_FILE.to_string(),
            requires_login: RequiresLogin::new(false),
        }
    }

    /// Human-readable console product name.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Path of the branding image.
    pub fn logo(&self) -> &str {
        &self.logo
    }

    /// Base path the console is served under.
    pub fn server_web_context(&self) -> &str {
        &self.server_web_context
    }

    /// Editor module activated when a process view opens.
    pub fn default_editor(&self) -> &str {
        &self.default_editor
    }

    pub fn overall_report_file(&self) -> &str {
        &self.overall_report_file
    }

    pub fn process_summary_report_file(&self) -> &str {
        &self.process_summary_report_file
    }

    pub fn instance_summary_report_file(&self) -> &str {
        &self.instance_summary_report_file
    }

    pub fn requires_login(&self) -> bool {
        self.requires_login.get()
    }

    pub fn requires_login_flag(&self) -> RequiresLogin {
        self.requires_login
    }

    /// All fields as `(wire name, wire value)` pairs in canonical order.
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            (FIELD_NAMES[0], self.profile_name.as_str()),
            (FIELD_NAMES[1], self.logo.as_str()),
            (FIELD_NAMES[2], self.server_web_context.as_str()),
            (FIELD_NAMES[3], self.default_editor.as_str()),
            (FIELD_NAMES[4], self.overall_report_file.as_str()),
            (FIELD_NAMES[5], self.process_summary_report_file.as_str()),
            (FIELD_NAMES[6], self.instance_summary_report_file.as_str()),
            (FIELD_NAMES[7], self.requires_login.as_str()),
        ]
    }

    /// Look up a field value by wire name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::riftsaw()
    }
}

/// Record as it appears in a source file, before validation.
///
/// Every field is optional here so a missing one surfaces as
/// [`ConfigError::MissingField`] rather than a format-specific message.
#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConsoleConfig {
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub server_web_context: Option<String>,
    #[serde(default)]
    pub default_editor: Option<String>,
    #[serde(default)]
    pub overall_report_file: Option<String>,
    #[serde(default)]
    pub process_summary_report_file: Option<String>,
    #[serde(default)]
    pub instance_summary_report_file: Option<String>,
    #[serde(default)]
    pub requires_login: Option<String>,
}

impl RawConsoleConfig {
    /// Assign a field by wire name. Returns `false` for unknown names.
    pub(crate) fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "profileName" => &mut self.profile_name,
            "logo" => &mut self.logo,
            "serverWebContext" => &mut self.server_web_context,
            "defaultEditor" => &mut self.default_editor,
            "overallReportFile" => &mut self.overall_report_file,
            "processSummaryReportFile" => &mut self.process_summary_report_file,
            "instanceSummaryReportFile" => &mut self.instance_summary_report_file,
            "requiresLogin" => &mut self.requires_login,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String> {
    value.ok_or(ConfigError::MissingField(name))
}

impl TryFrom<RawConsoleConfig> for ConsoleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConsoleConfig) -> Result<Self> {
        let config = Self {
            profile_name: required(raw.profile_name, FIELD_NAMES[0])?,
            logo: required(raw.logo, FIELD_NAMES[1])?,
            server_web_context: required(raw.server_web_context, FIELD_NAMES[2])?,
            default_editor: required(raw.default_editor, FIELD_NAMES[3])?,
            overall_report_file: required(raw.overall_report_file, FIELD_NAMES[4])?,
            process_summary_report_file: required(raw.process_summary_report_file, FIELD_NAMES[5])?,
            instance_summary_report_file: required(raw.instance_summary_report_file, FIELD_NAMES[6])?,
            requires_login: required(raw.requires_login, FIELD_NAMES[7])?.parse()?,
        };
        validate::validate(&config)?;
        Ok(config)
    }
}
