//! Configuration module for cc-optimize
//!
//! Handles the project-level `cc-optimize.toml`, which supplies
//! defaults for report flags.

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, ProjectConfig, CONFIG_FILE_NAME,
    DEFAULT_CONFIG,
};
