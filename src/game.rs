use crate::{Board, GameError, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    StandingBy,
    Playing,
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Start { board: Board, total_mines: usize },
    Flag { row: i32, col: i32 },
    RemoveFlag { row: i32, col: i32 },
    RevealCell { row: i32, col: i32 },
    Reset,
}

/// Finite-state controller around the board engine.
///
/// Holds the only live board value; every mutation swaps it for the fresh
/// value the engine returns. Once `Ended` is reached, win and loss are
/// distinguished solely by `revealed_bomb`.
#[derive(Debug)]
pub struct Game {
    phase: GamePhase,
    board: Board,
    total_mines: usize,
    revealed_bomb: bool,
}

impl Game {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::StandingBy,
            board: Board::empty(),
            total_mines: 0,
            revealed_bomb: false,
        }
    }

    /// Builds a mined board through the engine and adopts it. The one
    /// fallible command: size and mine count are caller configuration, not
    /// pointer-derived coordinates.
    pub fn start(&mut self, size: usize, total_mines: usize) -> Result<(), GameError> {
        let board = Board::new(size)?.place_mines(total_mines)?;
        self.handle(GameEvent::Start { board, total_mines });
        Ok(())
    }

    pub fn reveal(&mut self, row: i32, col: i32) {
        self.handle(GameEvent::RevealCell { row, col });
    }

    pub fn flag(&mut self, row: i32, col: i32) {
        self.handle(GameEvent::Flag { row, col });
    }

    pub fn remove_flag(&mut self, row: i32, col: i32) {
        self.handle(GameEvent::RemoveFlag { row, col });
    }

    pub fn reset(&mut self) {
        self.handle(GameEvent::Reset);
    }

    /// Synchronous transition function. After any transition that lands in
    /// `Playing` the terminal guards run before control returns, so a caller
    /// never observes an intermediate state.
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Start { board, total_mines } => {
                log::debug!(
                    "starting game: {size}x{size} board, {total_mines} mines",
                    size = board.size()
                );
                self.board = board;
                self.total_mines = total_mines;
                self.revealed_bomb = false;
                self.phase = GamePhase::Playing;
            }
            GameEvent::Reset => {
                log::debug!("resetting game");
                self.board = Board::empty();
                self.total_mines = 0;
                self.revealed_bomb = false;
                self.phase = GamePhase::StandingBy;
                return;
            }
            GameEvent::Flag { row, col } if self.phase == GamePhase::Playing => {
                // The engine is strict about bounds; pointer-derived
                // coordinates are not, so its rejection is swallowed here.
                if let Ok(board) = self.board.set_flag(Position::new(row, col)) {
                    self.board = board;
                }
            }
            GameEvent::RemoveFlag { row, col } if self.phase == GamePhase::Playing => {
                if let Ok(board) = self.board.remove_flag(Position::new(row, col)) {
                    self.board = board;
                }
            }
            GameEvent::RevealCell { row, col } if self.phase == GamePhase::Playing => {
                let pos = Position::new(row, col);
                self.board = self.board.reveal_cascade(pos);
                if self.board.is_within_bounds(pos) {
                    self.revealed_bomb = self.board.is_bomb_cell(pos);
                }
            }
            // Cell events outside of Playing are dropped.
            GameEvent::Flag { .. } | GameEvent::RemoveFlag { .. } | GameEvent::RevealCell { .. } => {
                return;
            }
        }
        self.check_terminal();
    }

    fn check_terminal(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        if self.revealed_bomb {
            log::debug!("bomb revealed, game lost");
            self.phase = GamePhase::Ended;
        } else if self.board_cleared() {
            log::debug!("all safe cells revealed, game won");
            self.phase = GamePhase::Ended;
        }
    }

    fn board_cleared(&self) -> bool {
        self.board.cells().all(|cell| {
            if cell.is_bomb {
                !cell.is_revealed
            } else {
                cell.is_revealed
            }
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn total_mines(&self) -> usize {
        self.total_mines
    }

    pub fn revealed_bomb(&self) -> bool {
        self.revealed_bomb
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
