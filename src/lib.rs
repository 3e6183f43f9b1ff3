pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod multiplayer;
pub mod rng;
pub mod score_board;
pub mod scoring;
pub mod types;
pub mod world;

pub use config::SessionConfig;
pub use engine::GameSession;
pub use error::{ConfigurationError, EngineError, ScoreBoardError};
pub use multiplayer::{MatchResult, MultiplayerCoordinator, PlayerSlot};
pub use score_board::ScoreBoard;
