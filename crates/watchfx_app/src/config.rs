//! watchfx configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use watchfx_animation::{Border, Curve};

/// Top-level watchfx configuration (watchfx.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct WatchfxConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub target: TargetConfig,
}

/// Timing and curve of the home page animation
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct AnimationConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Curve name, e.g. `linear` or `ease_in_out_quad`
    #[serde(default = "default_curve")]
    pub curve: String,
    #[serde(default = "default_true")]
    pub smooth_timer: bool,
    #[serde(default)]
    pub delay_ms: u64,
}

fn default_fps() -> u32 {
    60
}

fn default_duration_secs() -> f64 {
    1.0
}

fn default_curve() -> String {
    Curve::EaseInOutQuad.name().to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_secs: default_duration_secs(),
            curve: default_curve(),
            smooth_timer: true,
            delay_ms: 0,
        }
    }
}

impl AnimationConfig {
    /// Parse the configured curve name
    pub fn curve(&self) -> Result<Curve> {
        self.curve
            .parse::<Curve>()
            .with_context(|| format!("Invalid animation.curve {:?}", self.curve))
    }

    pub fn duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.duration_secs)
            .with_context(|| format!("Invalid animation.duration_secs {}", self.duration_secs))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Where the home page rectangle ends up
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct TargetConfig {
    #[serde(default = "default_target_color")]
    pub color: u32,
    #[serde(default = "default_target_xy")]
    pub x: f64,
    #[serde(default = "default_target_xy")]
    pub y: f64,
    #[serde(default = "default_target_size")]
    pub w: f64,
    #[serde(default = "default_target_size")]
    pub h: f64,
    #[serde(default = "default_target_radius")]
    pub radius: f64,
}

fn default_target_color() -> u32 {
    0x3232ff
}

fn default_target_xy() -> f64 {
    133.0
}

fn default_target_size() -> f64 {
    200.0
}

fn default_target_radius() -> f64 {
    100.0
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            color: default_target_color(),
            x: default_target_xy(),
            y: default_target_xy(),
            w: default_target_size(),
            h: default_target_size(),
            radius: default_target_radius(),
        }
    }
}

impl TargetConfig {
    pub fn border(&self) -> Border {
        Border::new(self.x, self.y, self.w, self.h, self.radius)
    }
}

impl WatchfxConfig {
    /// Load configuration from a file, or from `watchfx.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("watchfx.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WatchfxConfig = toml::from_str(content)?;
        config.animation.curve()?;
        config.animation.duration()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
