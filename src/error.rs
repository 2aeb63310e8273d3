//! Error types for reading binding sources

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::binding::SourceKind;

/// Why a single source file contributed no bindings
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read file: {0}")]
    Unreadable(#[from] io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    /// True when the file could not be opened or decoded as text
    pub fn is_unreadable(&self) -> bool {
        matches!(self, ParseError::Unreadable(_))
    }
}

/// A source that was skipped, with enough identity to report it
#[derive(Debug, Error)]
#[error("{kind} source {}: {error}", .path.display())]
pub struct ParseFailure {
    pub path: PathBuf,
    pub kind: SourceKind,
    #[source]
    pub error: ParseError,
}
