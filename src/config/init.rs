//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template keyclash.toml with documentation
pub const KEYCLASH_TOML_TEMPLATE: &str = r#"# keyclash.toml - Configuration for the keyclash conflict checker
#
# keyclash collects keyboard shortcuts from:
# - structured binding lists (*.yaml / *.yml under the data directory)
# - Karabiner-Elements (karabiner.json)
# - IdeaVim (.ideavimrc)
#
# and reports every key combination claimed by more than one of them.
# All settings are optional - uncomment and modify as needed.

[discovery]
# Only YAML files below this directory are read as binding lists.
# Set to "" to accept YAML files anywhere.
# Default: "keyboard-config/data"
# data_dir = "keyboard-config/data"

# Skip files matched by .gitignore.
# Default: true
# respect_gitignore = true

[conflicts]
# What counts as a separate configuration system:
#   "family" - yaml, karabiner and ideavim are one system each
#   "file"   - every file is its own system
# Default: "family"
# scope = "family"

[log]
# Append a timestamped record of each run to a log file.
# Default: true
# enabled = true

# Default: <local data dir>/keyclash/conflict-check.log
# file = "conflict-check.log"
"#;

/// Generate keyclash.toml in the specified directory (or current directory if None).
///
/// Returns an error if keyclash.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |d| d.join(CONFIG_FILE_NAME));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, KEYCLASH_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate keyclash.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
