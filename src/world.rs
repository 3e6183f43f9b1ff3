use crate::types::{MazeVariant, Position, Tile};

/// Flat row-major tile grid. `width` counts rows, `length` counts columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    variant: MazeVariant,
    length: i32,
    width: i32,
    cells: Vec<Tile>,
}

impl MazeGrid {
    pub fn build(variant: MazeVariant, length: i32, width: i32) -> Self {
        let mut cells = Vec::with_capacity(length.max(0) as usize * width.max(0) as usize);
        for row in 0..width {
            for col in 0..length {
                cells.push(classify(variant, length, width, Position::new(row, col)));
            }
        }
        Self {
            variant,
            length,
            width,
            cells,
        }
    }

    pub fn variant(&self) -> MazeVariant {
        self.variant
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.width && pos.col < self.length
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index_of(pos).map(|idx| self.cells[idx])
    }

    /// Structural class of a cell, ignoring whatever entity sits on it.
    pub fn terrain(&self, pos: Position) -> Option<Tile> {
        self.contains(pos)
            .then(|| classify(self.variant, self.length, self.width, pos))
    }

    pub(crate) fn set(&mut self, pos: Position, tile: Tile) {
        if let Some(idx) = self.index_of(pos) {
            self.cells[idx] = tile;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.length.max(1) as usize)
    }

    pub fn render_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|tile| tile.symbol()).collect::<String>())
            .collect()
    }

    pub fn count_tiles(&self, predicate: impl Fn(Tile) -> bool) -> usize {
        self.cells.iter().filter(|tile| predicate(**tile)).count()
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.row as usize * self.length as usize + pos.col as usize)
    }
}

pub fn is_border(length: i32, width: i32, pos: Position) -> bool {
    pos.row == 0 || pos.col == 0 || pos.row == width - 1 || pos.col == length - 1
}

/// Wall membership of an interior cell for a maze shape.
pub fn is_interior_wall(variant: MazeVariant, length: i32, pos: Position) -> bool {
    match variant {
        MazeVariant::LowerTriangle => pos.col > pos.row,
        MazeVariant::UpperTriangle => pos.col < pos.row,
        MazeVariant::Horizontal => pos.row % 2 == 0 && pos.col != 1 && pos.col != length - 2,
    }
}

pub fn classify(variant: MazeVariant, length: i32, width: i32, pos: Position) -> Tile {
    if is_border(length, width, pos) {
        Tile::Boundary
    } else if is_interior_wall(variant, length, pos) {
        Tile::Wall
    } else {
        Tile::Path
    }
}
