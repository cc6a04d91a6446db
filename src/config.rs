//! Configuration loading for `.vibecheck.toml`.
//!
//! Tuning lives here, not in code: per-pattern base weights and
//! detection thresholds, the external reasoning timeout, and the
//! default output format. Discovery walks ancestor directories the
//! same way the analyzer is usually invoked from a repo subdirectory.

use crate::patterns::PatternOverride;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VibecheckConfig {
    /// Per-pattern overrides, keyed by pattern id.
    #[serde(default)]
    pub patterns: HashMap<String, PatternOverride>,

    #[serde(default)]
    pub external: ExternalConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExternalConfig {
    /// Bound on the deep-mode external reasoning step, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

fn default_format() -> String {
    "terminal".to_string()
}

pub const CONFIG_FILE_NAME: &str = ".vibecheck.toml";

/// Read and parse a config file's contents.
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string.
pub fn parse_config(contents: &str) -> Result<VibecheckConfig, String> {
    toml::from_str::<VibecheckConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))
}

/// Try loading config from a specific path, warning on failures.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<VibecheckConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            None
        }
    }
}

/// Load configuration from an explicit path.
pub fn load_config_from(path: &Path) -> anyhow::Result<VibecheckConfig> {
    let contents = read_config_file(path)?;
    parse_config(&contents).map_err(|e| anyhow::anyhow!(e))
}

/// Locate and load `.vibecheck.toml` by walking up from the current
/// directory. Missing config is not an error: defaults apply.
pub fn load_config() -> VibecheckConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Cannot determine current directory: {e}");
            return VibecheckConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Directory ancestors of `start`, nearest first, up to a depth limit.
pub(crate) fn directory_ancestors(
    start: PathBuf,
    max_depth: usize,
) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Default config file contents written by `vibecheck init`.
pub fn default_config_toml() -> &'static str {
    r#"# Vibecheck configuration
#
# Per-pattern tuning. Every table is optional; built-in defaults apply
# where a key is absent.

# [patterns.infrastructure_without_implementation]
# base_weight = 1.0
# detection_threshold = 0.5

# [patterns.symptom_driven_development]
# enabled = false

[external]
# Bound on the deep-mode external reasoning step.
timeout_secs = 60

[output]
default_format = "terminal"
"#
}
