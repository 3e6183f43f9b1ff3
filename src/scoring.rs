//! Score policies. Both are pure functions of the final counters and the
//! alive flag, so recomputing a finished session's score is idempotent.

use crate::constants::{
    FOOD_WEIGHT, HIT_PENALTY, MONSTER_COUNT, MONSTER_WEIGHT, MOVE_PENALTY, SINGLE_FOOD_WEIGHT,
    SURVIVAL_BONUS,
};
use crate::types::{Counters, GameMode};

pub fn score(mode: GameMode, counters: &Counters, alive: bool) -> f64 {
    match mode {
        GameMode::MonsterMaze => monster_maze_score(counters, alive),
        GameMode::SingleFood => single_food_score(counters),
    }
}

pub fn monster_maze_score(counters: &Counters, alive: bool) -> f64 {
    let mut score = FOOD_WEIGHT * counters.food_eaten as f64
        + MONSTER_WEIGHT * counters.monsters_killed as f64
        - HIT_PENALTY * counters.hits as f64
        - MOVE_PENALTY * counters.moves as f64;
    if alive && counters.monsters_killed as usize == MONSTER_COUNT {
        score += SURVIVAL_BONUS;
    }
    score
}

pub fn single_food_score(counters: &Counters) -> f64 {
    SINGLE_FOOD_WEIGHT * counters.food_eaten as f64
        - HIT_PENALTY * counters.hits as f64
        - MOVE_PENALTY * counters.moves as f64
}
