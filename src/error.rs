use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("maze length must be at least {min}, got {actual}")]
    LengthTooSmall { min: i32, actual: i32 },
    #[error("maze width must be at least {min}, got {actual}")]
    WidthTooSmall { min: i32, actual: i32 },
    #[error("maze of {length}x{width} exceeds the {max} cell limit per side")]
    DimensionTooLarge { max: i32, length: i32, width: i32 },
    #[error("seed must be positive, got {0}")]
    NonPositiveSeed(i64),
    #[error("no free cell found for {entity} after {attempts} draws")]
    PlacementExhausted { entity: String, attempts: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invalid direction {0:?}")]
    InvalidDirection(String),
    #[error("game not active")]
    InactiveSession,
    #[error("game already started")]
    AlreadyStarted,
    #[error("no paused game to resume")]
    NotPaused,
    #[error("game has not finished yet")]
    NotFinished,
}

#[derive(Debug, Error)]
pub enum ScoreBoardError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse score board: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported score board version {0}")]
    UnsupportedVersion(u8),
}
