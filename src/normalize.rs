//! Key combination normalization.
//!
//! Every parser funnels its key data through [`normalize_combo`], so two
//! bindings reference the same physical shortcut exactly when their combos
//! compare equal. There is no alias table: `cmd` and `command` stay distinct.

/// Separator between modifiers and the base key
const SEPARATOR: char = '+';

/// Build the canonical combo string for a base key and a set of modifiers.
///
/// Modifiers are sorted case-insensitively and joined with `+`, the base key
/// goes last, and the whole result is lower-cased. Blank modifiers are
/// dropped.
pub fn normalize_combo<S: AsRef<str>>(key: &str, modifiers: &[S]) -> String {
    let mut sorted: Vec<String> = modifiers
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_lowercase)
        .collect();
    if sorted.is_empty() {
        return key.to_lowercase();
    }
    sorted.sort();

    let mut combo = sorted.join("+");
    combo.push(SEPARATOR);
    combo.push_str(&key.to_lowercase());
    combo
}

/// Re-normalize an already joined combo such as `"Shift+Ctrl+A"`.
///
/// The last `+`-separated segment is the base key. A trailing `++` names the
/// `+` key itself.
pub fn canonicalize(combo: &str) -> String {
    let (modifiers, key) = split_combo(combo);
    normalize_combo(key, &modifiers)
}

fn split_combo(combo: &str) -> (Vec<&str>, &str) {
    if combo == "+" {
        return (Vec::new(), combo);
    }

    let (prefix, key) = match combo.strip_suffix("++") {
        Some(rest) => (rest, "+"),
        None => combo.rsplit_once(SEPARATOR).unwrap_or(("", combo)),
    };

    let modifiers = prefix.split(SEPARATOR).filter(|m| !m.is_empty()).collect();
    (modifiers, key)
}
