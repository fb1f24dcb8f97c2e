//! World configuration loaded from TOML
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Unknown landmark kind names are rejected at parse time.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::DEFAULT_SPAWN_DENSITY;
use crate::world::landmarks::LandmarkKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("landmark kind list must not be empty")]
    NoLandmarkKinds,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_density")]
    pub density: u32,
    #[serde(default = "default_landmarks")]
    pub landmarks: Vec<LandmarkKind>,
}

fn default_seed() -> u64 {
    2137
}
fn default_density() -> u32 {
    DEFAULT_SPAWN_DENSITY
}
fn default_landmarks() -> Vec<LandmarkKind> {
    LandmarkKind::ALL.to_vec()
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            density: default_density(),
            landmarks: default_landmarks(),
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: WorldConfig = toml::from_str(&s)?;
    Ok(cfg)
}
