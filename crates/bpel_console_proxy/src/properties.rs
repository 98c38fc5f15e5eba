//! `bpel-console.properties` parsing.
//!
//! Follows the Java properties line format: `key=value`, `key: value` or
//! `key value`, `#`/`!` comments, trailing-backslash continuations and
//! backslash escapes.

use crate::error::{ProxyError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Key/value snapshot of a properties file. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (line_no, logical) in logical_lines(text) {
            let (key, value) = split_entry(&logical);
            let key = unescape(key).map_err(|message| ProxyError::Properties {
                line: line_no,
                message,
            })?;
            let value = unescape(value).map_err(|message| ProxyError::Properties {
                line: line_no,
                message,
            })?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    /// Read and parse a properties file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ProxyError::io(path, e))?;
        Self::parse(&text)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Like [`Properties::get`] but treats a missing key as an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| ProxyError::missing(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Join continuation lines and drop blanks and comments. Yields the
/// 1-based number of the first physical line of each entry.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut lines = text.lines().enumerate();
    while let Some((idx, line)) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }
        out.push((idx + 1, logical));
    }
    out
}

/// An odd run of trailing backslashes means the last one escapes the newline.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|ch| *ch == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                break;
            }
            ch if ch.is_whitespace() => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start();
    let rest = match rest.chars().next() {
        Some('=') | Some(':') => rest[1..].trim_start(),
        _ => rest,
    };
    (key, rest)
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| format!("malformed \\u escape: \\u{}", hex))?;
                let decoded = char::from_u32(code)
                    .ok_or_else(|| format!("invalid code point U+{:04X}", code))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
