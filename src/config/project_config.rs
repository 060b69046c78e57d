//! Project-level configuration support
//!
//! Loads `cc-optimize.toml` from the working directory, or from an
//! explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! [defaults]
//! format = "text"        # text, json, markdown
//! threshold = 10         # forced minimum CC (omit to use file means)
//! fail_on_flags = false  # exit 1 when anything is flagged
//! output = "cc-report.md"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "cc-optimize.toml";

/// Template written by `cc-optimize init`
pub const DEFAULT_CONFIG: &str = r#"# cc-optimize configuration

[defaults]
# Output format (text, json, markdown)
format = "text"

# Forced minimum CC value. When unset, each signature is compared against
# its file's mean complexity (module mean for single-signature files).
# threshold = 10

# Exit with code 1 when any signature is flagged
fail_on_flags = false

# Write the report to a file instead of stdout
# output = "cc-report.txt"
"#;

/// Project-level configuration loaded from cc-optimize.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Forced minimum CC value
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Exit non-zero when flags exist
    #[serde(default)]
    pub fail_on_flags: Option<bool>,

    /// Default output file
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Load `cc-optimize.toml` from `dir`.
///
/// Returns default configuration if the file is missing or broken.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No project config found, using defaults");
        return ProjectConfig::default();
    }

    match load_config_file(&path) {
        Ok(config) => {
            debug!("Loaded project config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {:#}", path.display(), e);
            ProjectConfig::default()
        }
    }
}

/// Load configuration from an explicit TOML file
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    if let Some(t) = config.defaults.threshold {
        if !t.is_finite() || t < 0.0 {
            anyhow::bail!(
                "Invalid config {}: threshold must be a non-negative number, got {}",
                path.display(),
                t
            );
        }
    }

    Ok(config)
}
