use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::constants::{
    food_count, monster_count, MONSTER_COUNT, PLAYER_ONE_LABEL, SINGLE_FOOD_COUNT,
};
use crate::error::EngineError;
use crate::rng::PositionSampler;
use crate::scoring;
use crate::types::{
    Counters, Direction, FinishReason, Food, GameMode, MazeVariant, Monster, MonsterKind,
    MoveOutcome, Position, ScoreRecord, SessionEvent, SessionStatus, Tile,
};
use crate::world::MazeGrid;

mod combat_system;
mod spawn_system;
mod utils;

pub use self::spawn_system::EntityPlacer;

use self::combat_system::Encounter;
use self::utils::offset;

/// One player's maze, entities, counters and lifecycle.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    game_id: u32,
    player_name: String,
    grid: MazeGrid,
    actor: Position,
    monsters: Vec<Monster>,
    foods: Vec<Food>,
    counters: Counters,
    status: SessionStatus,
    alive: bool,
    finish_reason: Option<FinishReason>,
    record: Option<ScoreRecord>,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Builds the grid and places every entity before returning. No partial
    /// session is ever handed out.
    pub fn new(
        config: SessionConfig,
        game_id: u32,
        player_name: &str,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let mut sampler = PositionSampler::from_seed(config.seed);
        let mut grid = MazeGrid::build(config.variant, config.length, config.width);
        let mut placer = EntityPlacer::new(&mut grid, &mut sampler);
        let (actor, monsters, foods) = match config.mode {
            GameMode::MonsterMaze => {
                let actor = placer.place_actor();
                let monsters = placer.place_monsters(monster_count(config.mode))?;
                let foods = placer.place_foods(food_count(config.mode))?;
                (actor, monsters, foods)
            }
            GameMode::SingleFood => {
                let food = placer.place_single_food()?;
                let actor = placer.place_actor();
                (actor, Vec::new(), vec![food])
            }
        };

        debug!(
            game_id,
            seed = config.seed,
            variant = ?config.variant,
            mode = ?config.mode,
            length = config.length,
            width = config.width,
            "session created"
        );

        Ok(Self {
            config,
            game_id,
            player_name: player_name.to_string(),
            grid,
            actor,
            monsters,
            foods,
            counters: Counters::default(),
            status: SessionStatus::Created,
            alive: true,
            finish_reason: None,
            record: None,
            events: Vec::new(),
        })
    }

    /// Monster maze for a single player.
    pub fn create(
        seed: i64,
        variant: MazeVariant,
        length: i32,
        width: i32,
    ) -> Result<Self, EngineError> {
        let config = SessionConfig::new(seed, variant, length, width, GameMode::MonsterMaze);
        Self::new(config, 1, PLAYER_ONE_LABEL)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn snapshot_grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn render_rows(&self) -> Vec<String> {
        self.grid.render_rows()
    }

    pub fn actor(&self) -> Position {
        self.actor
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn score_record(&self) -> Option<&ScoreRecord> {
        self.record.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Only a Created session can be started; a paused one goes through
    /// `resume`.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.status {
            SessionStatus::Created => {
                self.status = SessionStatus::InProgress;
                Ok(())
            }
            SessionStatus::Finished => Err(EngineError::InactiveSession),
            SessionStatus::InProgress | SessionStatus::Paused => Err(EngineError::AlreadyStarted),
        }
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        match self.status {
            SessionStatus::Finished => Err(EngineError::InactiveSession),
            _ => {
                self.status = SessionStatus::Paused;
                Ok(())
            }
        }
    }

    pub fn resume(&mut self) -> Result<(), EngineError> {
        match self.status {
            SessionStatus::Paused => {
                self.status = SessionStatus::InProgress;
                Ok(())
            }
            SessionStatus::Finished => Err(EngineError::InactiveSession),
            SessionStatus::Created | SessionStatus::InProgress => Err(EngineError::NotPaused),
        }
    }

    pub fn request_move_token(&mut self, token: &str) -> Result<MoveOutcome, EngineError> {
        let dir = Direction::parse_move(token)
            .ok_or_else(|| EngineError::InvalidDirection(token.to_string()))?;
        Ok(self.request_move(dir))
    }

    /// Runs one turn. Only a Created or InProgress session accepts moves.
    pub fn request_move(&mut self, dir: Direction) -> MoveOutcome {
        match self.status {
            SessionStatus::Finished | SessionStatus::Paused => return MoveOutcome::NotActive,
            SessionStatus::Created => self.status = SessionStatus::InProgress,
            SessionStatus::InProgress => {}
        }

        let target = offset(self.actor, dir);
        let tile = self.grid.get(target).unwrap_or(Tile::Boundary);
        if tile.is_blocking() {
            self.counters.hits += 1;
            self.events.push(SessionEvent::Blocked { at: target, tile });
            debug!(game_id = self.game_id, ?dir, ?tile, hits = self.counters.hits, "move blocked");
            return MoveOutcome::Blocked;
        }

        let encounter = self.resolve_encounter(target, tile);
        if !self.alive {
            self.finish(FinishReason::ActorDied);
            return MoveOutcome::Died;
        }

        self.grid.set(self.actor, Tile::Path);
        self.grid.set(target, Tile::Actor);
        self.actor = target;
        self.counters.moves += 1;
        debug!(
            game_id = self.game_id,
            ?dir,
            row = target.row,
            col = target.col,
            moves = self.counters.moves,
            "actor moved"
        );

        if let Some(reason) = self.terminal_reason() {
            self.finish(reason);
            return match reason {
                FinishReason::ActorDied => MoveOutcome::Died,
                FinishReason::AllMonstersKilled => MoveOutcome::AllMonstersKilled,
                FinishReason::FoodCollected => MoveOutcome::FoodCollected,
            };
        }

        match encounter {
            Encounter::Food => MoveOutcome::FoodCollected,
            Encounter::MonsterSlain(kind) => MoveOutcome::MonsterKilled(kind),
            Encounter::Empty | Encounter::Fatal(_) => MoveOutcome::Moved,
        }
    }

    /// Final score. Only defined once the session has finished.
    pub fn score(&self) -> Result<f64, EngineError> {
        if !self.is_finished() {
            return Err(EngineError::NotFinished);
        }
        Ok(scoring::score(self.config.mode, &self.counters, self.alive))
    }

    fn terminal_reason(&self) -> Option<FinishReason> {
        if !self.alive {
            return Some(FinishReason::ActorDied);
        }
        match self.config.mode {
            GameMode::MonsterMaze if self.counters.monsters_killed as usize == MONSTER_COUNT => {
                Some(FinishReason::AllMonstersKilled)
            }
            GameMode::SingleFood if self.counters.food_eaten as usize == SINGLE_FOOD_COUNT => {
                Some(FinishReason::FoodCollected)
            }
            _ => None,
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        if self.is_finished() {
            return;
        }
        self.status = SessionStatus::Finished;
        self.finish_reason = Some(reason);
        let score = scoring::score(self.config.mode, &self.counters, self.alive);
        self.record = Some(ScoreRecord {
            game_id: self.game_id,
            player_name: self.player_name.clone(),
            food_eaten: self.counters.food_eaten,
            monsters_killed: self.counters.monsters_killed,
            hits: self.counters.hits,
            moves: self.counters.moves,
            score,
        });
        self.events.push(SessionEvent::Finished { reason });
        info!(
            game_id = self.game_id,
            player = %self.player_name,
            ?reason,
            score,
            "session finished"
        );
    }
}

#[cfg(test)]
impl GameSession {
    /// Moves the monster of `kind` onto `pos`, adding one if the maze has none.
    pub(crate) fn stage_monster(&mut self, kind: MonsterKind, pos: Position) {
        self.foods.retain(|food| food.position != pos);
        self.monsters.retain(|monster| monster.position != pos || monster.kind == kind);
        match self.monsters.iter_mut().find(|monster| monster.kind == kind) {
            Some(monster) => {
                self.grid.set(monster.position, Tile::Path);
                monster.position = pos;
            }
            None => self.monsters.push(Monster { kind, position: pos }),
        }
        self.grid.set(pos, Tile::Monster(kind));
    }
}
