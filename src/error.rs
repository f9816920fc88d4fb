use std::fmt;

use crate::settings::ConfigError;
use crate::sim::level::LevelLoadError;

/// Errors raised while setting up a game
#[derive(Debug)]
pub enum GameError {
    Config(ConfigError),
    Level(LevelLoadError),
    NoLevels,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Level(err) => write!(f, "{err}"),
            Self::NoLevels => write!(f, "no levels configured"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Level(err) => Some(err),
            Self::NoLevels => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<LevelLoadError> for GameError {
    fn from(err: LevelLoadError) -> Self {
        Self::Level(err)
    }
}
