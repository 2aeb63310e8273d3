//! Source format parsers.
//!
//! Each supported configuration system has one parser that turns file content
//! into a flat list of [`BindingRecord`]s. Dispatch happens over the closed set
//! of [`SourceKind`]s, so callers never branch on format themselves.

mod ideavim;
mod karabiner;
mod yaml;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::binding::{BindingRecord, SourceKind};
use crate::error::{ParseError, ParseFailure};

pub const KARABINER_FILE_NAME: &str = "karabiner.json";
pub const IDEAVIM_FILE_NAME: &str = ".ideavimrc";

/// A discovered file together with the format it will be parsed as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Read and parse this file.
    ///
    /// Failures carry the file identity so the caller can log them and move on.
    pub fn parse(&self) -> Result<Vec<BindingRecord>, ParseFailure> {
        let result = fs::read_to_string(&self.path)
            .map_err(ParseError::from)
            .and_then(|content| self.kind.parse(&self.path, &content));

        match result {
            Ok(records) => {
                debug!(
                    path = %self.path.display(),
                    kind = %self.kind,
                    records = records.len(),
                    "parsed binding source"
                );
                Ok(records)
            }
            Err(error) => Err(ParseFailure {
                path: self.path.clone(),
                kind: self.kind,
                error,
            }),
        }
    }
}

impl SourceKind {
    /// Classify a file by name alone.
    ///
    /// Any `.yaml`/`.yml` file is treated as a structured binding list; the
    /// data directory restriction is applied by discovery, not here.
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        let name = path.file_name()?.to_str()?;
        match name {
            KARABINER_FILE_NAME => Some(SourceKind::Karabiner),
            IDEAVIM_FILE_NAME => Some(SourceKind::IdeaVim),
            _ => match path.extension().and_then(|e| e.to_str()) {
                Some("yaml" | "yml") => Some(SourceKind::Yaml),
                _ => None,
            },
        }
    }

    /// Parse already loaded content in this format
    pub fn parse(self, path: &Path, content: &str) -> Result<Vec<BindingRecord>, ParseError> {
        match self {
            SourceKind::Yaml => yaml::parse(path, content),
            SourceKind::Karabiner => karabiner::parse(path, content),
            SourceKind::IdeaVim => Ok(ideavim::parse(path, content)),
        }
    }
}
