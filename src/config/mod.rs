//! Configuration file support for keyclash.
//!
//! This module provides:
//! - Loading configuration from `keyclash.toml`
//! - Config file discovery (search upward from the project root)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, find_file_upward, load_config, ConfigError, CONFIG_FILE_NAME};
pub use init::{generate_init_file, generate_init_file_in, KEYCLASH_TOML_TEMPLATE};
pub use merge::{default_log_file, merge_settings, CliOptions, Settings};
pub use toml_schema::{ConflictsSection, DiscoverySection, KeyclashToml, LogSection};
