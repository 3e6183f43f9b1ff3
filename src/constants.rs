use crate::types::GameMode;

pub const MIN_MAZE_DIMENSION: i32 = 3;
pub const MAX_MAZE_DIMENSION: i32 = 1_000;

pub const MONSTER_COUNT: usize = 4;
pub const MONSTER_FOOD_COUNT: usize = 4;
pub const SINGLE_FOOD_COUNT: usize = 1;

pub const ACTOR_START_ROW: i32 = 1;
pub const ACTOR_START_COL: i32 = 1;
// Entities are never sampled onto the actor's starting row.
pub const PLACEMENT_MIN_ROW: i32 = 2;
pub const PLACEMENT_MIN_COL: i32 = 1;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
pub const PLACEMENT_WARN_ATTEMPTS: u32 = 1_000;

pub const FOOD_WEIGHT: f64 = 5.0;
pub const MONSTER_WEIGHT: f64 = 10.0;
pub const HIT_PENALTY: f64 = 0.5;
pub const MOVE_PENALTY: f64 = 0.25;
pub const SURVIVAL_BONUS: f64 = 20.0;
pub const SINGLE_FOOD_WEIGHT: f64 = 20.0;

pub const PLAYER_ONE_LABEL: &str = "Player 1";
pub const PLAYER_TWO_LABEL: &str = "Player 2";

pub const SCORE_BOARD_FILE_VERSION: u8 = 1;

pub fn food_count(mode: GameMode) -> usize {
    match mode {
        GameMode::MonsterMaze => MONSTER_FOOD_COUNT,
        GameMode::SingleFood => SINGLE_FOOD_COUNT,
    }
}

pub fn monster_count(mode: GameMode) -> usize {
    match mode {
        GameMode::MonsterMaze => MONSTER_COUNT,
        GameMode::SingleFood => 0,
    }
}
