use crate::{GameError, Position};
use ndarray::Array2;
use rand::Rng;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_bomb: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub count: u8,
}

/// Square grid of cells, indexed by zero-based (row, column).
///
/// Every mutating operation takes `&self` and returns a fresh `Board`, so a
/// caller holding the previous value never observes the change.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidSize(size));
        }

        Ok(Self {
            cells: Array2::default((size, size)),
        })
    }

    /// The size-0 board held by the state machine while no game is active.
    pub fn empty() -> Self {
        Self {
            cells: Array2::default((0, 0)),
        }
    }

    /// Cleared board with bombs at exactly the given positions.
    pub fn with_mines_at(size: usize, mines: &[Position]) -> Result<Self, GameError> {
        let mut board = Self::new(size)?;
        for &pos in mines {
            let index = board.index_of(pos).ok_or(GameError::CellNotFound(pos))?;
            board.cells[index].is_bomb = true;
        }
        Ok(board)
    }

    /// Marks `total_mines` distinct cells as bombs, chosen uniformly at
    /// random. Draws that land on an already-mined cell are discarded and
    /// retried until the exact count is placed.
    pub fn place_mines(&self, total_mines: usize) -> Result<Self, GameError> {
        if total_mines >= self.total_cells() {
            return Err(GameError::InvalidMineCount {
                mines: total_mines,
                cells: self.total_cells(),
            });
        }

        let mut next = self.clone();
        let mut rng = rand::thread_rng();
        let mut mines_placed = 0;

        while mines_placed < total_mines {
            let row = rng.gen_range(0..next.size());
            let col = rng.gen_range(0..next.size());

            let cell = &mut next.cells[(row, col)];
            if !cell.is_bomb {
                cell.is_bomb = true;
                mines_placed += 1;
            }
        }

        Ok(next)
    }

    pub fn size(&self) -> usize {
        self.cells.dim().0
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    fn index_of(&self, pos: Position) -> Option<(usize, usize)> {
        let size = self.size() as i32;
        if pos.row >= 0 && pos.row < size && pos.col >= 0 && pos.col < size {
            Some((pos.row as usize, pos.col as usize))
        } else {
            None
        }
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell, GameError> {
        let index = self.index_of(pos).ok_or(GameError::CellNotFound(pos))?;
        Ok(&self.cells[index])
    }

    pub fn is_revealed(&self, pos: Position) -> Result<bool, GameError> {
        Ok(self.get_cell(pos)?.is_revealed)
    }

    /// Bomb flag of the cell, or `false` off the board. Adjacency counting
    /// leans on the off-board case to treat missing neighbors as bomb-free.
    pub fn is_bomb_cell(&self, pos: Position) -> bool {
        self.index_of(pos)
            .map(|index| self.cells[index].is_bomb)
            .unwrap_or(false)
    }

    pub fn set_flag(&self, pos: Position) -> Result<Self, GameError> {
        self.with_flag(pos, true)
    }

    pub fn remove_flag(&self, pos: Position) -> Result<Self, GameError> {
        self.with_flag(pos, false)
    }

    fn with_flag(&self, pos: Position, flagged: bool) -> Result<Self, GameError> {
        let index = self.index_of(pos).ok_or(GameError::CellNotFound(pos))?;
        let mut next = self.clone();
        let cell = &mut next.cells[index];
        // Flags only exist on hidden cells; flagging a revealed cell is ignored.
        if !cell.is_revealed {
            cell.is_flagged = flagged;
        }
        Ok(next)
    }

    /// Marks a single cell revealed without touching its adjacency count.
    pub fn reveal_cell(&self, pos: Position) -> Result<Self, GameError> {
        let index = self.index_of(pos).ok_or(GameError::CellNotFound(pos))?;
        let mut next = self.clone();
        next.cells[index].is_revealed = true;
        Ok(next)
    }

    pub fn count_adjacent_bombs(&self, pos: Position) -> Result<u8, GameError> {
        let cell = self.get_cell(pos)?;
        if cell.is_bomb {
            return Err(GameError::OperationOnBombCell(pos));
        }
        Ok(self.adjacent_bombs(pos))
    }

    fn adjacent_bombs(&self, pos: Position) -> u8 {
        pos.neighbors().filter(|&p| self.is_bomb_cell(p)).count() as u8
    }

    /// Flood fill starting at `pos`: reveals the connected zero-adjacency
    /// region plus its boundary ring of numbered cells. A bomb start reveals
    /// only that cell; an off-board or already-revealed start changes
    /// nothing. Runs on an explicit worklist with a per-call visited set, so
    /// it never recurses and each position is processed at most once.
    pub fn reveal_cascade(&self, pos: Position) -> Self {
        let mut next = self.clone();
        let mut visited: HashSet<Position> = HashSet::new();
        let mut pending = VecDeque::from([pos]);
        let mut revealed = 0usize;

        while let Some(current) = pending.pop_front() {
            if !visited.insert(current) {
                continue;
            }

            let index = match next.index_of(current) {
                Some(index) => index,
                None => continue,
            };
            if next.cells[index].is_revealed {
                continue;
            }
            if next.cells[index].is_bomb {
                // The loss-triggering reveal: the bomb alone, nothing around it.
                next.cells[index].is_revealed = true;
                revealed += 1;
                continue;
            }

            let adjacent = next.adjacent_bombs(current);
            let cell = &mut next.cells[index];
            cell.is_revealed = true;
            revealed += 1;
            if adjacent > 0 {
                // Boundary of a mined region; the number shows, the fill stops.
                cell.count = adjacent;
                continue;
            }
            pending.extend(current.neighbors());
        }

        log::trace!("cascade from {:?} revealed {} cells", pos, revealed);
        next
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
