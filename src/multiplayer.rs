use serde::Serialize;
use tracing::info;

use crate::config::SessionConfig;
use crate::constants::{PLAYER_ONE_LABEL, PLAYER_TWO_LABEL};
use crate::engine::GameSession;
use crate::error::EngineError;
use crate::types::{Direction, MoveOutcome, ScoreRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
    pub winner: PlayerSlot,
    #[serde(rename = "playerOneScore")]
    pub player_one_score: f64,
    #[serde(rename = "playerTwoScore")]
    pub player_two_score: f64,
    pub record: ScoreRecord,
}

/// Two sessions on structurally identical mazes, played one after the other.
///
/// Player 1 keeps control until their session finishes; pausing only hands
/// control back to the caller. Once both have finished the winner is decided
/// a single time and only the winner's record is kept.
#[derive(Clone, Debug)]
pub struct MultiplayerCoordinator {
    sessions: [GameSession; 2],
    active: PlayerSlot,
    result: Option<MatchResult>,
}

impl MultiplayerCoordinator {
    pub fn new(config: SessionConfig, game_id: u32) -> Result<Self, EngineError> {
        let first = GameSession::new(config.clone(), game_id, PLAYER_ONE_LABEL)?;
        let second = GameSession::new(config, game_id, PLAYER_TWO_LABEL)?;
        Ok(Self {
            sessions: [first, second],
            active: PlayerSlot::One,
            result: None,
        })
    }

    /// `None` once both players are done.
    pub fn active_player(&self) -> Option<PlayerSlot> {
        if self.is_finished() {
            None
        } else {
            Some(self.active)
        }
    }

    pub fn session(&self, slot: PlayerSlot) -> &GameSession {
        &self.sessions[slot.index()]
    }

    pub fn game_id(&self) -> u32 {
        self.sessions[0].game_id()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn request_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.is_finished() {
            return MoveOutcome::NotActive;
        }
        let outcome = self.active_session_mut().request_move(dir);
        if self.active_session().is_finished() {
            self.advance();
        }
        outcome
    }

    pub fn request_move_token(&mut self, token: &str) -> Result<MoveOutcome, EngineError> {
        let dir = Direction::parse_move(token)
            .ok_or_else(|| EngineError::InvalidDirection(token.to_string()))?;
        Ok(self.request_move(dir))
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        if self.is_finished() {
            return Err(EngineError::InactiveSession);
        }
        self.active_session_mut().pause()
    }

    pub fn resume(&mut self) -> Result<(), EngineError> {
        if self.is_finished() {
            return Err(EngineError::InactiveSession);
        }
        self.active_session_mut().resume()
    }

    fn active_session(&self) -> &GameSession {
        &self.sessions[self.active.index()]
    }

    fn active_session_mut(&mut self) -> &mut GameSession {
        &mut self.sessions[self.active.index()]
    }

    fn advance(&mut self) {
        match self.active {
            PlayerSlot::One => {
                info!(game_id = self.game_id(), "player one finished, handing over");
                self.active = PlayerSlot::Two;
            }
            PlayerSlot::Two => self.decide(),
        }
    }

    fn decide(&mut self) {
        if self.result.is_some() {
            return;
        }
        let (Some(first), Some(second)) = (
            self.sessions[0].score_record(),
            self.sessions[1].score_record(),
        ) else {
            return;
        };

        // Ties go to player one.
        let winner = if second.score > first.score {
            PlayerSlot::Two
        } else {
            PlayerSlot::One
        };
        let record = match winner {
            PlayerSlot::One => first.clone(),
            PlayerSlot::Two => second.clone(),
        };
        info!(
            game_id = record.game_id,
            ?winner,
            player_one_score = first.score,
            player_two_score = second.score,
            "match decided"
        );
        self.result = Some(MatchResult {
            winner,
            player_one_score: first.score,
            player_two_score: second.score,
            record,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinishReason, GameMode, MazeVariant, MonsterKind, Position, SessionStatus};

    fn single_food_match(seed: i64) -> MultiplayerCoordinator {
        let config =
            SessionConfig::new(seed, MazeVariant::UpperTriangle, 9, 8, GameMode::SingleFood);
        MultiplayerCoordinator::new(config, 12).expect("match builds")
    }

    /// Walks the active player right along row 1, then down onto the food.
    fn walk_to_food(coordinator: &mut MultiplayerCoordinator) -> MoveOutcome {
        let slot = coordinator.active_player().expect("someone is playing");
        let food = coordinator.session(slot).foods()[0].position;
        let mut last = MoveOutcome::NotActive;
        for _ in 1..food.col {
            last = coordinator.request_move(Direction::Right);
        }
        for _ in 1..food.row {
            last = coordinator.request_move(Direction::Down);
        }
        last
    }

    #[test]
    fn both_players_get_the_same_maze_and_game_id() {
        let coordinator = single_food_match(99);
        let one = coordinator.session(PlayerSlot::One);
        let two = coordinator.session(PlayerSlot::Two);
        assert_eq!(one.render_rows(), two.render_rows());
        assert_eq!(one.foods(), two.foods());
        assert_eq!(one.game_id(), 12);
        assert_eq!(two.game_id(), 12);
        assert_eq!(one.player_name(), "Player 1");
        assert_eq!(two.player_name(), "Player 2");
    }

    #[test]
    fn player_one_plays_until_finished() {
        let mut coordinator = single_food_match(4);
        assert_eq!(coordinator.active_player(), Some(PlayerSlot::One));
        coordinator.request_move(Direction::Up);
        assert_eq!(coordinator.session(PlayerSlot::One).counters().hits, 1);
        assert_eq!(coordinator.session(PlayerSlot::Two).counters().hits, 0);

        assert_eq!(walk_to_food(&mut coordinator), MoveOutcome::FoodCollected);
        assert_eq!(coordinator.active_player(), Some(PlayerSlot::Two));
        assert_eq!(
            coordinator.session(PlayerSlot::Two).status(),
            SessionStatus::Created
        );
        assert!(!coordinator.is_finished());
    }

    #[test]
    fn pause_returns_control_without_switching_players() {
        let mut coordinator = single_food_match(4);
        coordinator.request_move(Direction::Right);
        coordinator.pause().expect("pause player one");
        assert_eq!(coordinator.request_move(Direction::Right), MoveOutcome::NotActive);
        assert_eq!(coordinator.active_player(), Some(PlayerSlot::One));

        coordinator.resume().expect("resume player one");
        assert_eq!(
            coordinator.session(PlayerSlot::One).status(),
            SessionStatus::InProgress
        );
        assert_eq!(coordinator.session(PlayerSlot::One).counters().moves, 1);
    }

    #[test]
    fn equal_scores_favour_player_one() {
        let mut coordinator = single_food_match(31);
        walk_to_food(&mut coordinator);
        walk_to_food(&mut coordinator);

        assert!(coordinator.is_finished());
        assert_eq!(coordinator.active_player(), None);
        let result = coordinator.result().expect("match decided");
        assert_eq!(result.player_one_score, result.player_two_score);
        assert_eq!(result.winner, PlayerSlot::One);
        assert_eq!(result.record.player_name, "Player 1");
        assert_eq!(result.record.game_id, 12);
    }

    #[test]
    fn higher_score_wins() {
        let mut coordinator = single_food_match(31);
        coordinator.request_move(Direction::Up);
        coordinator.request_move(Direction::Left);
        walk_to_food(&mut coordinator);
        walk_to_food(&mut coordinator);

        let result = coordinator.result().expect("match decided");
        assert_eq!(result.winner, PlayerSlot::Two);
        assert!((result.player_one_score + 1.0 - result.player_two_score).abs() < f64::EPSILON);
        assert_eq!(result.record.player_name, "Player 2");
        assert_eq!(result.record.hits, 0);
    }

    #[test]
    fn monster_maze_death_hands_over_and_counts_toward_the_decision() {
        let config = SessionConfig::new(17, MazeVariant::Horizontal, 10, 9, GameMode::MonsterMaze);
        let mut coordinator = MultiplayerCoordinator::new(config, 5).expect("match builds");
        for session in coordinator.sessions.iter_mut() {
            session.stage_monster(MonsterKind::Red, Position::new(1, 2));
        }

        assert_eq!(coordinator.request_move(Direction::Up), MoveOutcome::Blocked);
        assert_eq!(coordinator.request_move(Direction::Right), MoveOutcome::Died);
        assert_eq!(coordinator.active_player(), Some(PlayerSlot::Two));

        let first = coordinator.session(PlayerSlot::One);
        assert_eq!(first.finish_reason(), Some(FinishReason::ActorDied));
        assert_eq!(first.counters().moves, 0);
        assert_eq!(first.actor(), Position::new(1, 1));
        let first_score = first.score().expect("player one finished");
        assert!((first_score + 0.5).abs() < f64::EPSILON, "got {first_score}");

        // Further input goes to player two; player one's score is frozen.
        assert_eq!(coordinator.request_move(Direction::Right), MoveOutcome::Died);
        let result = coordinator.result().expect("match decided");
        assert_eq!(result.player_one_score.to_bits(), first_score.to_bits());
        assert!(result.player_two_score.abs() < f64::EPSILON);
        assert_eq!(result.winner, PlayerSlot::Two);
        assert_eq!(result.record.player_name, "Player 2");
        assert_eq!(result.record.game_id, 5);
    }

    #[test]
    fn finished_match_rejects_further_input() {
        let mut coordinator = single_food_match(8);
        walk_to_food(&mut coordinator);
        walk_to_food(&mut coordinator);
        let before = coordinator.result().cloned();

        assert_eq!(coordinator.request_move(Direction::Down), MoveOutcome::NotActive);
        assert_eq!(coordinator.pause(), Err(EngineError::InactiveSession));
        assert_eq!(coordinator.resume(), Err(EngineError::InactiveSession));
        assert_eq!(coordinator.result().cloned(), before);
    }

    #[test]
    fn invalid_token_does_not_consume_a_turn() {
        let mut coordinator = single_food_match(8);
        assert_eq!(
            coordinator.request_move_token("jump"),
            Err(EngineError::InvalidDirection("jump".to_string()))
        );
        assert_eq!(
            coordinator.session(PlayerSlot::One).status(),
            SessionStatus::Created
        );
    }
}
