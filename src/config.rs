use std::collections::HashMap;

use anyhow::Context as _;
use serde::Deserialize;

/// Server configuration, loaded from a YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub vhosts: Vec<VhostConfig>,
}

/// One virtual host: a name plus its per-vhost option list.
#[derive(Debug, Clone, Deserialize)]
pub struct VhostConfig {
    pub name: String,
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl VhostConfig {
    /// Look up an option, treating an empty value as absent.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl Config {
    /// Load from the path in `BOARD_CONFIG`, defaulting to `board.yaml`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("BOARD_CONFIG").unwrap_or_else(|_| "board.yaml".to_string());
        Self::from_file(&path)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config {path}"))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(raw).context("invalid config")
    }
}
