//! IdeaVim `.ideavimrc` mapping directives

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::binding::{BindingRecord, Source, SourceKind};
use crate::normalize::normalize_combo;

/// Mapping commands, tried in order; the first match wins
static MAPPING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(map|nmap|vmap|imap|nnoremap|vnoremap|inoremap)\s+(\S+)\s+(.+)$",
        r"^(noremap)\s+(\S+)\s+(.+)$",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("static regex must compile"))
    .collect()
});

pub(super) fn parse(path: &Path, content: &str) -> Vec<BindingRecord> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(path, idx + 1, line.trim()))
        .collect()
}

fn parse_line(path: &Path, line_num: usize, line: &str) -> Option<BindingRecord> {
    let caps = MAPPING_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(line))?;

    // The key token carries its own modifier syntax (`<C-k>`), so it is only lower-cased.
    Some(BindingRecord {
        combo: normalize_combo::<&str>(&caps[2], &[]),
        source: Source::line(path, line_num, SourceKind::IdeaVim),
        action: caps[3].trim().to_string(),
        status: caps[1].to_string(),
    })
}
