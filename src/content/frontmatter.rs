//! Frontmatter extraction from YAML (`---`) or TOML (`+++`) blocks.
//!
//! YAML blocks go through `serde_yaml`, TOML blocks through `toml`. Both
//! land in a JSON map so the store checks one shape.

use serde_json::{Map, Value};

/// Raw frontmatter fields plus the body that follows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter<'a> {
    pub fields: Map<String, Value>,
    pub body: &'a str,
}

/// Split `content` into frontmatter fields and body.
///
/// Returns `Ok(None)` when the content has no frontmatter block and
/// `Err(message)` when the block does not parse.
pub fn extract(content: &str) -> Result<Option<Frontmatter<'_>>, String> {
    let Some((fm, body, is_toml)) = detect_frontmatter(content) else {
        return Ok(None);
    };

    let fields = if is_toml {
        parse_toml(fm)?
    } else {
        parse_yaml(fm)?
    };

    Ok(Some(Frontmatter { fields, body }))
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let rest = &trimmed[3 + end + 4..];
            // Drop the remainder of the closing fence line
            let body = rest
                .find('\n')
                .map_or("", |nl| &rest[nl + 1..])
                .trim_start_matches(['\r', '\n']);
            return Some((fm, body, is_toml));
        }
    }

    None
}

/// Parse YAML frontmatter into JSON values.
///
/// An empty block yields no fields. Unquoted dates such as `2024-01-01`
/// stay strings.
fn parse_yaml(content: &str) -> Result<Map<String, Value>, String> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())? {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Map::new()),
        _ => Err("frontmatter must be a mapping of `key: value` pairs".to_string()),
    }
}

/// Parse TOML frontmatter into JSON values.
///
/// TOML datetimes become their string form (`2024-01-01`).
fn parse_toml(content: &str) -> Result<Map<String, Value>, String> {
    let table: toml::Table = toml::from_str(content).map_err(|e| e.message().to_string())?;
    Ok(table
        .into_iter()
        .map(|(k, v)| (k, toml_to_json(v)))
        .collect())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
