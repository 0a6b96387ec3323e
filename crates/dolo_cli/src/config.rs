//! DOLO configuration file handling

use anyhow::{bail, Context, Result};
use dolo_animation::{GridConfig, OutlineConfig};
use dolo_core::ColorScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration (dolo.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DoloConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub outline: OutlineConfig,
    #[serde(default)]
    pub grid: GridConfig,
}

/// Headless viewport
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Initial color scheme
    #[serde(default)]
    pub scheme: ColorScheme,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            scheme: ColorScheme::default(),
        }
    }
}

/// Frame budget used when no scenario is given
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Logical milliseconds between frames
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f64,
}

fn default_frames() -> u32 {
    600
}

fn default_tick_ms() -> f64 {
    16.666
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl DoloConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DoloConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            bail!("viewport dimensions must be non-zero");
        }
        if !(self.run.tick_ms.is_finite() && self.run.tick_ms > 0.0) {
            bail!("run.tick_ms must be > 0");
        }
        self.outline.validate().context("invalid [outline] section")?;
        self.grid.validate().context("invalid [grid] section")?;
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
