//! Viewer configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.
//! Every field has a default, so a config file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rasterizer::{Color, Vec3};

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Rotation and zoom behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Starting Euler angles in radians
    pub initial_rotation: Vec3,
    /// Radians per second around each axis
    pub rotation_rates: Vec3,
    pub zoom: f64,
    /// Factor applied per zoom key press
    pub zoom_step: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            initial_rotation: Vec3::new(0.7, 0.9, 0.3),
            rotation_rates: Vec3::new(0.6, 0.8, 0.4),
            zoom: 0.6,
            zoom_step: 1.1,
        }
    }
}

/// Frame pacing and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub target_fps: u32,
    /// Longest time step (seconds) fed to the animation after a stall
    pub max_frame_time: f64,
    /// Silhouette outline color
    pub edge_color: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_time: 0.1,
            edge_color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub animation: AnimationConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Reject values the render loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".into()));
        }
        if !(self.display.max_frame_time > 0.0) {
            return Err(ConfigError::Invalid("max_frame_time must be positive".into()));
        }
        if !(self.animation.zoom_step > 1.0) {
            return Err(ConfigError::Invalid("zoom_step must be greater than 1".into()));
        }
        if !self.animation.zoom.is_finite() {
            return Err(ConfigError::Invalid("zoom must be a finite number".into()));
        }
        Ok(())
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<Config, ConfigError> {
    let config: Config = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Pretty RON text for a config
pub fn config_to_string(config: &Config) -> Result<String, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(config, pretty)?)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
    fs::write(path, config_to_string(config)?)?;
    Ok(())
}
