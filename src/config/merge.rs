//! Configuration merging logic
//!
//! Priority: CLI args > keyclash.toml > defaults

use std::path::PathBuf;

use crate::conflict::SystemScope;
use crate::walker::DiscoveryOptions;

use super::toml_schema::KeyclashToml;

const LOG_FILE_NAME: &str = "conflict-check.log";

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub discovery: DiscoveryOptions,
    pub scope: SystemScope,
    /// `None` disables the log file
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            discovery: DiscoveryOptions::default(),
            scope: SystemScope::default(),
            log_file: default_log_file(),
        }
    }
}

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliOptions {
    pub data_dir: Option<String>,
    pub scope: Option<SystemScope>,
    /// If Some(true), walk files listed in .gitignore too
    pub no_gitignore: Option<bool>,
    pub log_file: Option<PathBuf>,
    /// If Some(true), skip the log file entirely
    pub no_log_file: Option<bool>,
}

/// `<local data dir>/keyclash/conflict-check.log`, if the platform has one
pub fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("keyclash").join(LOG_FILE_NAME))
}

/// Merge configurations from CLI, TOML, and defaults.
///
/// Priority: CLI > TOML > defaults
pub fn merge_settings(cli: &CliOptions, toml: Option<&KeyclashToml>) -> Settings {
    let defaults = Settings::default();
    let discovery = toml.map(|t| &t.discovery);
    let log = toml.map(|t| &t.log);

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| discovery.and_then(|d| d.data_dir.clone()))
        .unwrap_or(defaults.discovery.data_dir);

    let respect_gitignore = cli
        .no_gitignore
        .map(|no| !no)
        .or_else(|| discovery.and_then(|d| d.respect_gitignore))
        .unwrap_or(defaults.discovery.respect_gitignore);

    let scope = cli
        .scope
        .or_else(|| toml.and_then(|t| t.conflicts.scope))
        .unwrap_or(defaults.scope);

    let log_enabled = !cli.no_log_file.unwrap_or(false)
        && (cli.log_file.is_some() || log.and_then(|l| l.enabled).unwrap_or(true));

    let log_file = if log_enabled {
        cli.log_file
            .clone()
            .or_else(|| log.and_then(|l| l.file.clone()))
            .or(defaults.log_file)
    } else {
        None
    };

    Settings {
        discovery: DiscoveryOptions {
            data_dir,
            respect_gitignore,
        },
        scope,
        log_file,
    }
}
