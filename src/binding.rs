//! Unified binding model shared by every source format.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// The configuration system (parser family) a binding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Declarative `bindings:` list in a YAML data file
    Yaml,
    /// Karabiner-Elements `karabiner.json`
    Karabiner,
    /// IdeaVim `.ideavimrc`
    IdeaVim,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Yaml => "yaml",
            SourceKind::Karabiner => "karabiner",
            SourceKind::IdeaVim => "ideavim",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a binding was declared.
///
/// Displays as `path` or `path:line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub line: Option<usize>,
    pub kind: SourceKind,
}

impl Source {
    pub fn file(path: &Path, kind: SourceKind) -> Self {
        Self {
            path: path.to_path_buf(),
            line: None,
            kind,
        }
    }

    pub fn line(path: &Path, line: usize, kind: SourceKind) -> Self {
        Self {
            path: path.to_path_buf(),
            line: Some(line),
            kind,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One key combination claimed by one configuration entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRecord {
    /// Canonical combination, see [`crate::normalize_combo`]
    pub combo: String,
    pub source: Source,
    pub action: String,
    pub status: String,
}

impl BindingRecord {
    pub fn system(&self) -> SourceKind {
        self.source.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display_without_line() {
        let source = Source::file(Path::new("data/nav.yaml"), SourceKind::Yaml);
        assert_eq!(source.to_string(), "data/nav.yaml");
    }

    #[test]
    fn test_source_display_with_line() {
        let source = Source::line(Path::new("home/.ideavimrc"), 12, SourceKind::IdeaVim);
        assert_eq!(source.to_string(), "home/.ideavimrc:12");
    }

    #[test]
    fn test_source_serializes_as_string() {
        let source = Source::line(Path::new(".ideavimrc"), 3, SourceKind::IdeaVim);
        assert_eq!(serde_json::to_value(&source).unwrap(), ".ideavimrc:3");
        assert_eq!(serde_json::to_value(SourceKind::IdeaVim).unwrap(), "ideavim");
    }

    #[test]
    fn test_record_reports_its_system() {
        let record = BindingRecord {
            combo: "caps_lock".to_string(),
            source: Source::file(Path::new("karabiner.json"), SourceKind::Karabiner),
            action: "Karabiner rule".to_string(),
            status: "Active".to_string(),
        };
        assert_eq!(record.system(), SourceKind::Karabiner);
    }
}
