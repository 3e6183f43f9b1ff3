use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Accepts the legacy keys (`W`, `A`, `S`, `D`) and the direction names,
    /// both case-insensitive.
    pub fn parse_move(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Some(Self::Up),
            "s" | "down" => Some(Self::Down),
            "a" | "left" => Some(Self::Left),
            "d" | "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// (row delta, col delta)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MazeVariant {
    LowerTriangle,
    UpperTriangle,
    Horizontal,
}

impl MazeVariant {
    pub const ALL: [MazeVariant; 3] = [Self::LowerTriangle, Self::UpperTriangle, Self::Horizontal];

    /// Menu codes `1..=3` or the short names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "lower" | "lower_triangle" => Some(Self::LowerTriangle),
            "2" | "upper" | "upper_triangle" => Some(Self::UpperTriangle),
            "3" | "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    MonsterMaze,
    SingleFood,
}

impl GameMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monster" | "monster_maze" => Some(Self::MonsterMaze),
            "food" | "single_food" => Some(Self::SingleFood),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterKind {
    Red,
    Blue,
    Green,
    Yellow,
}

impl MonsterKind {
    /// Placement order.
    pub const ALL: [MonsterKind; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    pub fn symbol(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Boundary,
    Wall,
    Path,
    Actor,
    Food,
    Monster(MonsterKind),
}

impl Tile {
    pub fn symbol(self) -> char {
        match self {
            Self::Boundary => '#',
            Self::Wall => '-',
            Self::Path => '.',
            Self::Actor => 'P',
            Self::Food => '*',
            Self::Monster(kind) => kind.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Boundary),
            '-' => Some(Self::Wall),
            '.' => Some(Self::Path),
            'P' => Some(Self::Actor),
            '*' => Some(Self::Food),
            other => MonsterKind::ALL
                .into_iter()
                .find(|kind| kind.symbol() == other)
                .map(Self::Monster),
        }
    }

    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Boundary | Self::Wall)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Food {
    pub kind: FoodKind,
    pub position: Position,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub hits: u32,
    pub moves: u32,
    #[serde(rename = "foodEaten")]
    pub food_eaten: u32,
    #[serde(rename = "monstersKilled")]
    pub monsters_killed: u32,
    #[serde(rename = "superpowerCharges")]
    pub superpower_charges: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    InProgress,
    Paused,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    ActorDied,
    AllMonstersKilled,
    FoodCollected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    Blocked,
    Moved,
    FoodCollected,
    MonsterKilled(MonsterKind),
    Died,
    AllMonstersKilled,
    NotActive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Blocked {
        at: Position,
        tile: Tile,
    },
    FoodEaten {
        at: Position,
    },
    MonsterKilled {
        kind: MonsterKind,
        at: Position,
    },
    ActorDied {
        #[serde(rename = "killedBy")]
        killed_by: MonsterKind,
        at: Position,
    },
    Finished {
        reason: FinishReason,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "gameId")]
    pub game_id: u32,
    #[serde(rename = "playerName")]
    pub player_name: String,
    #[serde(rename = "foodEaten")]
    pub food_eaten: u32,
    #[serde(rename = "monstersKilled")]
    pub monsters_killed: u32,
    pub hits: u32,
    pub moves: u32,
    pub score: f64,
}
