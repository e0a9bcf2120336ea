use thiserror::Error;

use super::types::Position;

/// Errors raised while building a [`GridMap`](super::GridMap) from a layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Maze layout is empty")]
    Empty,

    #[error("Maze layout is not rectangular: row {row} has {found} columns, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Maze layout has no open cells")]
    NoOpenCells,
}

/// Errors raised by the movement resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Cell {position} has no open neighbor")]
    DeadEnd { position: Position },
}
