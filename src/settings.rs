//! Game configuration
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::PARTICLE_COUNT;

/// Why a configuration file could not be used
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed reading config {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Level files, played in order
    pub levels: Vec<PathBuf>,
    /// Seed for power-up rolls and particle jitter
    pub seed: u64,
    /// Shake the screen when the ball hits a solid brick
    pub screen_shake: bool,
    /// Trail particle pool size (0 disables the trail)
    pub particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            levels: ["one", "two", "three", "four"]
                .iter()
                .map(|name| Path::new("levels").join(format!("{name}.lvl")))
                .collect(),
            seed: 0,
            screen_shake: true,
            particles: PARTICLE_COUNT,
        }
    }
}

impl GameConfig {
    /// Bricks fill the top half of the screen
    pub fn level_area(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height / 2.0)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve relative level paths against `root`
    pub fn with_level_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        for path in &mut self.levels {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }
}
