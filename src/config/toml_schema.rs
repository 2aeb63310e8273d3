//! TOML schema definitions for keyclash.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::conflict::SystemScope;

/// Root structure for keyclash.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct KeyclashToml {
    /// Where binding sources are looked for
    #[serde(default)]
    pub discovery: DiscoverySection,

    /// How conflicts are scoped
    #[serde(default)]
    pub conflicts: ConflictsSection,

    /// Log file settings
    #[serde(default)]
    pub log: LogSection,
}

/// `[discovery]` section in keyclash.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DiscoverySection {
    /// Directory that holds structured binding YAML (default: keyboard-config/data)
    pub data_dir: Option<String>,

    /// Honour .gitignore while walking (default: true)
    pub respect_gitignore: Option<bool>,
}

/// `[conflicts]` section in keyclash.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConflictsSection {
    /// "family" or "file" (default: family)
    pub scope: Option<SystemScope>,
}

/// `[log]` section in keyclash.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LogSection {
    /// Append run logs to a file (default: true)
    pub enabled: Option<bool>,

    /// Log file path (default: <data dir>/keyclash/conflict-check.log)
    pub file: Option<PathBuf>,
}
