//! Settings structures

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Provider ids excluded from keyword routing and fan-out
    pub disabled_plugins: Vec<String>,
    /// Advisory UI cap; the engine always merges to its own fixed cap
    pub max_results: usize,
    /// Shell theme name
    pub theme: String,
    /// Global activation shortcut, in the shell's accelerator syntax
    pub hotkey: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            disabled_plugins: Vec::new(),
            max_results: crate::MAX_RESULTS,
            theme: "dark".into(),
            hotkey: "CommandOrControl+Space".into(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist settings as pretty-printed JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        if let Some(dir) = path.as_ref().parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Merge with environment variables (GENIE_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("GENIE_DISABLED_PLUGINS") {
            self.disabled_plugins = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(val) = std::env::var("GENIE_THEME") {
            self.theme = val;
        }
        if let Ok(val) = std::env::var("GENIE_MAX_RESULTS") {
            if let Ok(n) = val.parse() {
                self.max_results = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.disabled_plugins.is_empty());
        assert_eq!(settings.max_results, crate::MAX_RESULTS);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.disabled_plugins = vec!["integration:media".into()];
        settings.save(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.disabled_plugins, vec!["integration:media"]);
        assert_eq!(loaded.theme, "dark");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"disabled_plugins": ["core:web-search"]}"#).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.disabled_plugins, vec!["core:web-search"]);
        assert_eq!(loaded.hotkey, "CommandOrControl+Space");
    }

    #[test]
    fn test_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Settings::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_merge_env_overrides_disabled_list() {
        std::env::set_var("GENIE_DISABLED_PLUGINS", "a, b,,c");
        let mut settings = Settings::default();
        settings.merge_env();
        std::env::remove_var("GENIE_DISABLED_PLUGINS");

        assert_eq!(settings.disabled_plugins, vec!["a", "b", "c"]);
    }
}
