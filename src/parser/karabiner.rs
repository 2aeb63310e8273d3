//! Karabiner-Elements `karabiner.json`
//!
//! Only complex modification rules are read. Every manipulator whose `from`
//! event names a `key_code` becomes one binding; pointer buttons and other
//! non-keyboard triggers are skipped.

use std::path::Path;

use serde::Deserialize;

use crate::binding::{BindingRecord, Source, SourceKind};
use crate::error::ParseError;
use crate::normalize::normalize_combo;

const FALLBACK_ACTION: &str = "Karabiner rule";
const STATUS_ACTIVE: &str = "Active";

#[derive(Debug, Deserialize)]
struct KarabinerConfig {
    #[serde(default)]
    profiles: Vec<Profile>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    complex_modifications: ComplexModifications,
}

#[derive(Debug, Default, Deserialize)]
struct ComplexModifications {
    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct Rule {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    manipulators: Vec<Manipulator>,
}

#[derive(Debug, Deserialize)]
struct Manipulator {
    #[serde(default)]
    from: FromEvent,
}

#[derive(Debug, Default, Deserialize)]
struct FromEvent {
    #[serde(default)]
    key_code: Option<String>,
    #[serde(default)]
    modifiers: FromModifiers,
}

#[derive(Debug, Default, Deserialize)]
struct FromModifiers {
    #[serde(default)]
    mandatory: Vec<String>,
}

pub(super) fn parse(path: &Path, content: &str) -> Result<Vec<BindingRecord>, ParseError> {
    let config: KarabinerConfig = serde_json::from_str(content)?;
    let mut records = Vec::new();

    for profile in &config.profiles {
        for rule in &profile.complex_modifications.rules {
            let action = rule.description.as_deref().unwrap_or(FALLBACK_ACTION);

            for manipulator in &rule.manipulators {
                let Some(key_code) = manipulator
                    .from
                    .key_code
                    .as_deref()
                    .filter(|k| !k.is_empty())
                else {
                    continue;
                };

                records.push(BindingRecord {
                    combo: normalize_combo(key_code, &manipulator.from.modifiers.mandatory),
                    source: Source::file(path, SourceKind::Karabiner),
                    action: action.to_string(),
                    status: STATUS_ACTIVE.to_string(),
                });
            }
        }
    }

    Ok(records)
}
