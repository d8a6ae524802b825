//! Game engine: move validation and terminal-state evaluation.

use super::position::Position;
use super::types::{Board, GameStatus, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Error returned when a move cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already taken.
    #[display("Square {} is already taken", _0)]
    SquareOccupied(Position),

    /// The index does not name a square on the board.
    #[display("Index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game engine.
///
/// Owns the board, whose turn it is, and the game status. A move
/// either fully commits (square set, history extended, status
/// re-evaluated) or leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Mark,
    status: GameStatus,
    history: Vec<Position>,
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Game {
    /// Creates a new game with an empty board. Mark A moves first.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::A,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moves next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the positions played so far, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Applies a move for the mark whose turn it is.
    ///
    /// On success the square is taken, the status re-evaluated, and the
    /// turn passed to the opponent if the game continues. Returns the
    /// status after the move.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::GameOver` if the game already ended, or
    /// `MoveError::SquareOccupied` if the square is taken. Neither
    /// mutates any state.
    #[instrument(skip(self), fields(mark = ?self.to_move))]
    pub fn make_move(&mut self, position: Position) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(position.to_index()) {
            return Err(MoveError::SquareOccupied(position));
        }

        self.board.set(position, Square::Taken(self.to_move));
        self.history.push(position);
        self.status = self.evaluate_terminal();
        if self.status == GameStatus::InProgress {
            self.to_move = self.to_move.opponent();
        }

        Ok(self.status)
    }

    /// Applies a move addressed by raw board index (0-8).
    ///
    /// # Errors
    ///
    /// Returns `MoveError::OutOfBounds` for indices past the board,
    /// otherwise behaves like [`Game::make_move`].
    #[instrument(skip(self))]
    pub fn make_move_index(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.make_move(position)
    }

    /// Evaluates the board for a terminal state.
    ///
    /// Rescans all 8 lines on every call. The winner check runs before
    /// the fullness check, so a move that fills the last square and
    /// completes a line is a win, not a draw.
    pub fn evaluate_terminal(&self) -> GameStatus {
        if let Some(winner) = self.winner() {
            return GameStatus::Won(winner);
        }
        if self.board.is_full() {
            return GameStatus::Draw;
        }
        GameStatus::InProgress
    }

    /// Checks whether any line is fully taken by one mark.
    fn winner(&self) -> Option<Mark> {
        for [a, b, c] in LINES {
            let first = self.board.get(a)?;
            if first != Square::Empty && Some(first) == self.board.get(b) && Some(first) == self.board.get(c)
            {
                if let Square::Taken(mark) = first {
                    return Some(mark);
                }
            }
        }
        None
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
