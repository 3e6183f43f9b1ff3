use std::path::Path;

use serde::Deserialize;

use crate::constants::{MAX_MAZE_DIMENSION, MIN_MAZE_DIMENSION};
use crate::error::ConfigurationError;
use crate::types::{GameMode, MazeVariant};

/// Everything needed to build a session. Fixed for the lifetime of the
/// session once validated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    pub seed: i64,
    pub variant: MazeVariant,
    pub length: i32,
    pub width: i32,
    #[serde(default = "default_mode")]
    pub mode: GameMode,
}

fn default_mode() -> GameMode {
    GameMode::MonsterMaze
}

impl SessionConfig {
    pub fn new(seed: i64, variant: MazeVariant, length: i32, width: i32, mode: GameMode) -> Self {
        Self {
            seed,
            variant,
            length,
            width,
            mode,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.seed <= 0 {
            return Err(ConfigurationError::NonPositiveSeed(self.seed));
        }
        if self.length < MIN_MAZE_DIMENSION {
            return Err(ConfigurationError::LengthTooSmall {
                min: MIN_MAZE_DIMENSION,
                actual: self.length,
            });
        }
        if self.width < MIN_MAZE_DIMENSION {
            return Err(ConfigurationError::WidthTooSmall {
                min: MIN_MAZE_DIMENSION,
                actual: self.width,
            });
        }
        if self.length > MAX_MAZE_DIMENSION || self.width > MAX_MAZE_DIMENSION {
            return Err(ConfigurationError::DimensionTooLarge {
                max: MAX_MAZE_DIMENSION,
                length: self.length,
                width: self.width,
            });
        }
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))
    }
}
