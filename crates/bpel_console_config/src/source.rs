//! Reading and writing the record in its on-disk forms.
//!
//! The front-end ships the record as `console.config.js`
//! (`var consoleConfig = { ... };`). JSON and TOML files carry the same
//! eight keys.

use crate::defaults::SCRIPT_VARIABLE;
use crate::error::{ConfigError, Result};
use crate::record::{ConsoleConfig, RawConsoleConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// On-disk representation of a console record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    Toml,
    /// `console.config.js` object literal
    Script,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("js") => Ok(Self::Script),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "script" | "js" => Ok(Self::Script),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a record from text in the given format.
    pub fn from_str_with(format: ConfigFormat, text: &str) -> Result<Self> {
        let raw: RawConsoleConfig = match format {
            ConfigFormat::Json => serde_json::from_str(text)
                .map_err(|e| ConfigError::parse(format, e.to_string()))?,
            ConfigFormat::Toml => {
                toml::from_str(text).map_err(|e| ConfigError::parse(format, e.to_string()))?
            }
            ConfigFormat::Script => parse_script(text)?,
        };
        Self::try_from(raw)
    }

    /// Load a record from a file, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_str_with(format, &text)?;
        tracing::info!(
            path = %path.display(),
            %format,
            profile = config.profile_name(),
            "Loaded console configuration"
        );
        Ok(config)
    }

    /// Render in the given format.
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Json => self.to_json_pretty(),
            ConfigFormat::Toml => self.to_toml(),
            ConfigFormat::Script => Ok(self.to_script()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize(ConfigFormat::Json, e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize(ConfigFormat::Toml, e.to_string()))
    }

    /// Render as the `console.config.js` script the front-end includes.
    pub fn to_script(&self) -> String {
        let mut out = format!("var {} = {{\n", SCRIPT_VARIABLE);
        let fields = self.fields();
        for (idx, (name, value)) in fields.iter().enumerate() {
            // A JSON string literal is also a valid JS string literal.
            let literal = serde_json::Value::String((*value).to_string()).to_string();
            let sep = if idx + 1 < fields.len() { "," } else { "" };
            out.push_str(&format!("  {}: {}{}\n", name, literal, sep));
        }
        out.push_str("};\n");
        out
    }
}

/// Parse a `console.config.js` style object literal.
fn parse_script(text: &str) -> Result<RawConsoleConfig> {
    let mut scanner = Scanner::new(text);
    let mut raw = RawConsoleConfig::default();
    let mut seen = HashSet::new();

    scanner.skip_trivia()?;
    if scanner.peek() != Some('{') {
        let keyword = scanner.identifier()?;
        if !matches!(keyword.as_str(), "var" | "let" | "const") {
            return Err(scanner.error(format!("unexpected `{}`", keyword)));
        }
        scanner.skip_trivia()?;
        scanner.identifier()?;
        scanner.skip_trivia()?;
        scanner.expect('=')?;
        scanner.skip_trivia()?;
    }

    scanner.expect('{')?;
    loop {
        scanner.skip_trivia()?;
        if scanner.eat('}') {
            break;
        }
        let key = match scanner.peek() {
            Some('"') | Some('\'') => scanner.string()?,
            _ => scanner.identifier()?,
        };
        scanner.skip_trivia()?;
        scanner.expect(':')?;
        scanner.skip_trivia()?;
        let value = match scanner.peek() {
            Some('"') | Some('\'') => scanner.string()?,
            _ => {
                return Err(scanner.error(format!("value of `{}` must be a string literal", key)));
            }
        };
        if !seen.insert(key.clone()) {
            return Err(scanner.error(format!("duplicate key `{}`", key)));
        }
        if !raw.set(&key, value) {
            return Err(scanner.error(format!("unknown key `{}`", key)));
        }
        scanner.skip_trivia()?;
        if scanner.eat(',') {
            continue;
        }
        scanner.expect('}')?;
        break;
    }

    scanner.skip_trivia()?;
    scanner.eat(';');
    scanner.skip_trivia()?;
    if let Some(ch) = scanner.peek() {
        return Err(scanner.error(format!("trailing content starting with `{}`", ch)));
    }
    Ok(raw)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            let found = match self.peek() {
                Some(ch) => format!("`{}`", ch),
                None => "end of input".to_string(),
            };
            Err(self.error(format!("expected `{}`, found {}", expected, found)))
        }
    }

    /// Skip whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.pos += 1;
                }
                (Some('/'), Some('/')) => {
                    while let Some(ch) = self.bump() {
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.pos += 2;
                                break;
                            }
                            (Some(_), _) => self.pos += 1,
                            (None, _) => return Err(self.error("unterminated block comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn identifier(&mut self) -> Result<String> {
        let start = self.pos;
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' || ch == '$' => self.pos += 1,
            Some(ch) => return Err(self.error(format!("expected identifier, found `{}`", ch))),
            None => return Err(self.error("expected identifier, found end of input")),
        }
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
        {
            self.pos += 1;
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn string(&mut self) -> Result<String> {
        let quote = match self.bump() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error("expected string literal")),
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string literal")),
                Some(ch) if ch == quote => return Ok(out),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{0008}',
                        Some('f') => '\u{000C}',
                        Some('u') => self.unicode_escape()?,
                        Some(ch @ ('"' | '\'' | '\\' | '/')) => ch,
                        Some(ch) => return Err(self.error(format!("unsupported escape `\\{}`", ch))),
                        None => return Err(self.error("unterminated string literal")),
                    };
                    out.push(escaped);
                }
                Some(ch) => out.push(ch),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|ch| ch.to_digit(16))
                .ok_or_else(|| self.error("invalid \\u escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point U+{:04X}", code)))
    }

    fn error(&self, message: impl fmt::Display) -> ConfigError {
        let consumed = &self.chars[..self.pos.min(self.chars.len())];
        let line = consumed.iter().filter(|ch| **ch == '\n').count() + 1;
        let column = consumed.iter().rev().take_while(|ch| **ch != '\n').count() + 1;
        ConfigError::parse(
            ConfigFormat::Script,
            format!("{} at line {}, column {}", message, line, column),
        )
    }
}
