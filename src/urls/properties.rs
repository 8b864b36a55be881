//! Flat `key=value` dialect.
//!
//! Keys before any `[section]` header, or inside `[DEFAULT]`, form the
//! default section; keys in other sections are ignored. Lines ending in a
//! backslash continue onto the next line.

use std::fmt;

/// A line that is neither blank, a comment, a header, nor an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for PropertiesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for PropertiesError {}

/// Read the default-section pairs of a flat config file, in order of first
/// appearance. A key repeated in the same file keeps its first position and
/// its last value.
pub fn default_section(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut in_default = true;
    let mut lines = text.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(['#', ';', '!']) {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or_else(|| PropertiesError {
                line: line_no,
                message: format!("unterminated section header: {line}"),
            })?;
            in_default = name.trim() == "DEFAULT";
            continue;
        }

        let mut logical = line.to_string();
        while logical.ends_with('\\') {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let Some(split) = logical.find(['=', ':']) else {
            return Err(PropertiesError {
                line: line_no,
                message: format!("expected `key = value`, found: {line}"),
            });
        };
        let key = logical[..split].trim();
        let value = logical[split + 1..].trim();
        if key.is_empty() {
            return Err(PropertiesError {
                line: line_no,
                message: "empty key".to_string(),
            });
        }

        if !in_default {
            continue;
        }
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    Ok(pairs)
}
