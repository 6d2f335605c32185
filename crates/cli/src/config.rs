use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use wordlink_graph::EngineConfig;

pub(crate) const DOT_BINARY_ENV: &str = "WORDLINK_DOT";

/// Settings loadable from a TOML file; flags override them afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ranking parameters passed to the engine
    pub engine: EngineConfig,

    /// Where rendered images and walk transcripts are written
    pub output_dir: PathBuf,

    /// Render PNGs through Graphviz after queries that produce paths
    pub render: bool,

    /// Graphviz executable
    pub dot_binary: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            output_dir: PathBuf::from("."),
            render: true,
            dot_binary: "dot".to_string(),
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Environment overrides (currently only the renderer binary)
    pub fn apply_env(&mut self) {
        if let Ok(binary) = env::var(DOT_BINARY_ENV) {
            let binary = binary.trim();
            if !binary.is_empty() {
                self.dot_binary = binary.to_string();
            }
        }
    }
}
