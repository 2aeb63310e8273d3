use ignore::WalkBuilder;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::binding::SourceKind;
use crate::parser::SourceFile;

/// Default location of the structured binding data files
pub const DEFAULT_DATA_DIR: &str = "keyboard-config/data";

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// YAML files are only picked up when their path contains this directory.
    /// Empty accepts YAML files anywhere.
    pub data_dir: String,
    pub respect_gitignore: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            respect_gitignore: true,
        }
    }
}

/// Walk paths and collect every binding source beneath them.
///
/// Results are grouped by source kind (YAML, Karabiner, IdeaVim) and sorted by
/// path within each kind so reports are stable between runs.
pub fn discover_sources(
    paths: &[PathBuf],
    options: &DiscoveryOptions,
) -> (Vec<SourceFile>, Vec<io::Error>) {
    let mut sources = vec![];
    let mut errors = vec![];

    for path in paths {
        let walker = WalkBuilder::new(path)
            .hidden(false) // .ideavimrc is a dotfile
            .follow_links(true) // linked dotfiles
            .git_ignore(options.respect_gitignore)
            .git_global(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                        continue;
                    }
                    // Files named on the command line skip the data directory check
                    let explicit = entry.depth() == 0;
                    if let Some(kind) = classify(entry.path(), explicit, options) {
                        sources.push(SourceFile::new(entry.into_path(), kind));
                    }
                }
                Err(e) => {
                    errors.push(io::Error::other(e.to_string()));
                }
            }
        }
    }

    sources.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.path.cmp(&b.path)));
    sources.dedup();

    (sources, errors)
}

fn classify(path: &Path, explicit: bool, options: &DiscoveryOptions) -> Option<SourceKind> {
    let kind = SourceKind::from_path(path)?;
    if kind == SourceKind::Yaml && !explicit && !contains_dir(path, &options.data_dir) {
        return None;
    }
    Some(kind)
}

/// True if `dir`'s components appear as a contiguous run in `path`'s parent
fn contains_dir(path: &Path, dir: &str) -> bool {
    let needle: Vec<Component<'_>> = Path::new(dir)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if needle.is_empty() {
        return true;
    }

    let haystack: Vec<Component<'_>> = match path.parent() {
        Some(parent) => parent.components().collect(),
        None => return false,
    };

    haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}
