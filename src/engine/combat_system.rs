use super::*;

/// What the actor ran into on the target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Encounter {
    Empty,
    Food,
    MonsterSlain(MonsterKind),
    Fatal(MonsterKind),
}

impl GameSession {
    /// Applies pickup and combat effects of stepping onto `target` before the
    /// actor is relocated. A fatal encounter leaves the monster in place.
    pub(super) fn resolve_encounter(&mut self, target: Position, tile: Tile) -> Encounter {
        match tile {
            Tile::Food => {
                self.counters.food_eaten += 1;
                self.counters.superpower_charges += 1;
                if let Some(food) = self
                    .foods
                    .iter_mut()
                    .find(|food| !food.collected && food.position == target)
                {
                    food.collected = true;
                }
                self.grid.set(target, Tile::Path);
                self.events.push(SessionEvent::FoodEaten { at: target });
                Encounter::Food
            }
            Tile::Monster(kind) if self.counters.superpower_charges > 0 => {
                self.counters.superpower_charges -= 1;
                self.counters.monsters_killed += 1;
                self.monsters.retain(|monster| monster.position != target);
                self.grid.set(target, Tile::Path);
                self.events.push(SessionEvent::MonsterKilled { kind, at: target });
                Encounter::MonsterSlain(kind)
            }
            Tile::Monster(kind) => {
                self.alive = false;
                self.events.push(SessionEvent::ActorDied {
                    killed_by: kind,
                    at: target,
                });
                Encounter::Fatal(kind)
            }
            _ => Encounter::Empty,
        }
    }
}
