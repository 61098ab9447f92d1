use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("cannot place {mines} mines on a board with {cells} cells")]
    InvalidMineCount { mines: usize, cells: usize },
    #[error("no cell at {0:?}")]
    CellNotFound(Position),
    #[error("adjacency count is undefined for the bomb cell at {0:?}")]
    OperationOnBombCell(Position),
}
