use tracing::warn;

use crate::constants::{
    ACTOR_START_COL, ACTOR_START_ROW, MAX_PLACEMENT_ATTEMPTS, PLACEMENT_MIN_COL,
    PLACEMENT_MIN_ROW, PLACEMENT_WARN_ATTEMPTS,
};
use crate::error::ConfigurationError;
use crate::rng::PositionSampler;
use crate::types::{Food, FoodKind, Monster, MonsterKind, Position, Tile};
use crate::world::{is_interior_wall, MazeGrid};

/// Rejection-sampling placement of the actor, monsters and food.
pub struct EntityPlacer<'a> {
    grid: &'a mut MazeGrid,
    sampler: &'a mut PositionSampler,
}

impl<'a> EntityPlacer<'a> {
    pub fn new(grid: &'a mut MazeGrid, sampler: &'a mut PositionSampler) -> Self {
        Self { grid, sampler }
    }

    pub fn place_actor(&mut self) -> Position {
        let start = Position::new(ACTOR_START_ROW, ACTOR_START_COL);
        self.grid.set(start, Tile::Actor);
        start
    }

    pub fn place_monsters(&mut self, count: usize) -> Result<Vec<Monster>, ConfigurationError> {
        let mut monsters = Vec::with_capacity(count);
        for kind in MonsterKind::ALL.into_iter().take(count) {
            let position = self.sample_free_cell(&format!("{kind:?} monster"))?;
            self.grid.set(position, Tile::Monster(kind));
            monsters.push(Monster { kind, position });
        }
        Ok(monsters)
    }

    pub fn place_foods(&mut self, count: usize) -> Result<Vec<Food>, ConfigurationError> {
        let mut foods = Vec::with_capacity(count);
        for _ in 0..count {
            let position = self.sample_free_cell("food")?;
            self.grid.set(position, Tile::Food);
            foods.push(Food {
                kind: FoodKind::Special,
                position,
                collected: false,
            });
        }
        Ok(foods)
    }

    /// Legacy single-food rule: the draw is accepted on maze geometry alone,
    /// not on current tile content.
    pub fn place_single_food(&mut self) -> Result<Food, ConfigurationError> {
        let variant = self.grid.variant();
        let length = self.grid.length();
        let position = self.sample_until("food", |_, pos| !is_interior_wall(variant, length, pos))?;
        self.grid.set(position, Tile::Food);
        Ok(Food {
            kind: FoodKind::Special,
            position,
            collected: false,
        })
    }

    fn sample_free_cell(&mut self, entity: &str) -> Result<Position, ConfigurationError> {
        self.sample_until(entity, |grid, pos| grid.get(pos) == Some(Tile::Path))
    }

    fn sample_until(
        &mut self,
        entity: &str,
        accept: impl Fn(&MazeGrid, Position) -> bool,
    ) -> Result<Position, ConfigurationError> {
        let grid: &MazeGrid = &*self.grid;
        let max_row = grid.width() - 2;
        let max_col = grid.length() - 2;

        let has_candidate = (PLACEMENT_MIN_ROW..=max_row).any(|row| {
            (PLACEMENT_MIN_COL..=max_col).any(|col| accept(grid, Position::new(row, col)))
        });
        if !has_candidate {
            return Err(ConfigurationError::PlacementExhausted {
                entity: entity.to_string(),
                attempts: 0,
            });
        }

        for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
            let col = self.sampler.next(PLACEMENT_MIN_COL, max_col);
            let row = self.sampler.next(PLACEMENT_MIN_ROW, max_row);
            let pos = Position::new(row, col);
            if !accept(grid, pos) {
                continue;
            }
            if attempt >= PLACEMENT_WARN_ATTEMPTS {
                warn!(entity, attempt, "placement needed many draws");
            }
            return Ok(pos);
        }

        Err(ConfigurationError::PlacementExhausted {
            entity: entity.to_string(),
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }
}
