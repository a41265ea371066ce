use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "survey-analyzer.json";

/// User-tunable settings. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rows shown in the preview after an upload.
    pub preview_rows: usize,
    pub window_width: f32,
    pub window_height: f32,
    pub chart_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            window_width: 1200.0,
            window_height: 800.0,
            chart_height: 420.0,
        }
    }
}

impl AppConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load [`CONFIG_FILE`] if present; any problem falls back to defaults.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
