use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Gateway configuration, loaded from a JSON file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GatewayConfig {
    /// Domain appended when converting vendor identifiers to local ones,
    /// e.g. "vendor.example.org" turns "somebody" into
    /// "somebody@vendor.example.org".
    pub domain: String,
    /// Directory the presence icons are loaded from.
    pub icon_dir: PathBuf,
}

impl GatewayConfig {
    pub fn new(domain: &str, icon_dir: &Path) -> Self {
        GatewayConfig {
            domain: domain.to_string(),
            icon_dir: icon_dir.to_path_buf(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GatewayConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded gateway config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
