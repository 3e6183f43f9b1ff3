use crate::types::{Direction, Position};

pub(super) fn offset(pos: Position, dir: Direction) -> Position {
    let (d_row, d_col) = dir.delta();
    Position::new(pos.row + d_row, pos.col + d_col)
}
