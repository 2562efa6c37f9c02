use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::field::{FrameParams, Resolution};
use crate::renderer::OrbitCamera;

pub const CONFIG_FILE: &str = "windtower.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub params: ParamsConfig,
    pub display: DisplayConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    pub velocity: f64,
    pub twist: f64,
    pub strength: f64,
    pub resolution: Resolution,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        let p = FrameParams::default();
        Self {
            velocity: p.velocity,
            twist: p.twist,
            strength: p.strength,
            resolution: p.resolution,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            target_fps: 30,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let c = OrbitCamera::default();
        Self {
            yaw: c.yaw,
            pitch: c.pitch,
            distance: c.distance,
        }
    }
}

impl ParamsConfig {
    /// Raw values; range clamping is the control surface's job.
    pub fn to_params(&self) -> FrameParams {
        FrameParams {
            velocity: self.velocity,
            twist: self.twist,
            strength: self.strength,
            resolution: self.resolution,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> OrbitCamera {
        OrbitCamera {
            yaw: self.yaw,
            pitch: self.pitch,
            distance: self.distance,
        }
        .sanitized()
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Load `windtower.yaml` from the working directory, falling back to defaults.
pub fn load() -> Config {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }
    match load_from(path) {
        Ok(cfg) => {
            log::info!("loaded {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("{}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}
