//! Configuration file loading for impostor-word
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `IMPOSTOR_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./impostor.toml` or `./.impostor.toml`
//! 4. Global: `$XDG_CONFIG_HOME/impostor/config.toml`
//! 5. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    FileConfig, FileGameConfig, FileOllamaConfig, FilePacingConfig, FilePlayerEntry,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::{ConfigError, ConfigLoader};
