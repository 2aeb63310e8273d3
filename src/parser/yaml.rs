//! Structured binding lists (`bindings:` YAML data files)

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::binding::{BindingRecord, Source, SourceKind};
use crate::error::ParseError;
use crate::normalize::normalize_combo;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct BindingFile {
    bindings: Vec<RawBinding>,
}

#[derive(Debug, Deserialize)]
struct RawBinding {
    #[serde(default)]
    key: Option<Value>,
    #[serde(default)]
    modifiers: Option<Vec<String>>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

pub(super) fn parse(path: &Path, content: &str) -> Result<Vec<BindingRecord>, ParseError> {
    let file: BindingFile = serde_yaml::from_str(content)?;

    let records = file
        .bindings
        .into_iter()
        .filter_map(|binding| {
            let key = binding.key.as_ref().and_then(scalar_to_string)?;
            if key.is_empty() {
                return None;
            }
            let modifiers = binding.modifiers.unwrap_or_default();

            Some(BindingRecord {
                combo: normalize_combo(&key, &modifiers),
                source: Source::file(path, SourceKind::Yaml),
                action: binding.action.unwrap_or_else(|| UNKNOWN.to_string()),
                status: binding.status.unwrap_or_else(|| UNKNOWN.to_string()),
            })
        })
        .collect();

    Ok(records)
}

/// Keys like `1` or `f1` may come back from YAML as numbers or strings.
/// Strings are kept verbatim: `" "` is the space bar.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
