//! Shape checks applied to every loaded record.

use crate::error::{ConfigError, Result};
use crate::record::ConsoleConfig;

/// Check a record. Reports the first failure in field order.
pub fn validate(config: &ConsoleConfig) -> Result<()> {
    for (name, value) in config.fields() {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyField(name));
        }
    }
    validate_web_context(config.server_web_context())?;
    validate_editor_id(config.default_editor())?;
    Ok(())
}

/// `serverWebContext` must start with exactly one `/` and contain no
/// whitespace, so `//host` style network paths are rejected.
pub fn validate_web_context(context: &str) -> Result<()> {
    let well_formed = context.starts_with('/')
        && !context.starts_with("//")
        && !context.chars().any(char::is_whitespace);
    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::InvalidWebContext(context.to_string()))
    }
}

/// `defaultEditor` must look like `org.example.EditorModule`.
pub fn validate_editor_id(editor: &str) -> Result<()> {
    if editor.split('.').all(is_identifier) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEditorId(editor.to_string()))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}
