//! Configuration module
//!
//! Settings live in one JSON file under the user config directory. The
//! engine consumes only the disabled-provider list; the remaining knobs are
//! advisory for the shell around it.

mod settings;

pub use settings::Settings;

use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Settings load/save failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Default on-disk location for settings
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("genie").join("settings.json"))
}

/// Load settings from `GENIE_SETTINGS_PATH`, then the default location,
/// falling back to defaults; environment overrides merge last
pub fn load_or_default() -> Settings {
    let mut settings = candidate_paths()
        .into_iter()
        .find(|path| path.exists())
        .and_then(|path| match Settings::from_file(&path) {
            Ok(settings) => {
                info!("loaded settings from {}", path.display());
                Some(settings)
            }
            Err(e) => {
                warn!("ignoring settings at {}: {}", path.display(), e);
                None
            }
        })
        .unwrap_or_default();
    settings.merge_env();
    settings
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var("GENIE_SETTINGS_PATH") {
        paths.push(PathBuf::from(path));
    }
    if let Some(path) = default_path() {
        paths.push(path);
    }
    paths
}
