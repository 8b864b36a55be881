//! Nested YAML dialect: only the top level is enumerated.

use serde_yaml::Value;

/// Top-level `(key, value)` pairs of a YAML document, in document order.
///
/// Scalar values are rendered as plain text; nested mappings and sequences
/// are kept verbatim as YAML. Non-string keys are skipped.
pub fn top_level(text: &str) -> Result<Vec<(String, String)>, String> {
    let doc: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    let mapping = match doc {
        Value::Mapping(m) => m,
        Value::Null => return Err("document is empty".to_string()),
        _ => return Err("top level is not a mapping".to_string()),
    };

    let mut pairs = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let Value::String(key) = key else {
            continue;
        };
        pairs.push((key, render(&value)?));
    }
    Ok(pairs)
}

fn render(value: &Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| e.to_string()),
    }
}
