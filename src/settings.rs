use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write log output to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Set of plugin names which should be enabled. If `None`, all loaded
    /// plugins are enabled.
    #[serde(default)]
    pub enabled_plugins: Option<HashSet<String>>,
    #[serde(default)]
    pub plugin_settings: HashMap<String, serde_json::Value>,
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn plugin_enabled(&self, name: &str) -> bool {
        self.enabled_plugins
            .as_ref()
            .map(|set| set.contains(name))
            .unwrap_or(true)
    }
}
