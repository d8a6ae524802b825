//! Core domain types for the tic-tac-toe board.

use serde::{Deserialize, Serialize};

/// A player's mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// First player's mark (moves first).
    A,
    /// Second player's mark.
    B,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square taken by a mark. Squares never revert to empty.
    Taken(Mark),
}

/// 3x3 board, squares in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, idx: usize) -> Option<Square> {
        self.squares.get(idx).copied()
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: super::Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if the square at the given index is empty.
    pub fn is_empty(&self, idx: usize) -> bool {
        matches!(self.get(idx), Some(Square::Empty))
    }

    /// Checks if every square is taken.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as an emoji grid, one row per line.
    ///
    /// The per-square emoji matches what chat clients render for
    /// `:white_large_square:`, `:regional_indicator_x:` and `:o2:`.
    pub fn render(&self) -> String {
        let mut grid = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let emoji = match self.squares[row * 3 + col] {
                    Square::Empty => "\u{2b1c}",
                    Square::Taken(Mark::A) => "\u{1f1fd}",
                    Square::Taken(Mark::B) => "\u{1f17e}\u{fe0f}",
                };
                grid.push_str(emoji);
            }
            if row < 2 {
                grid.push('\n');
            }
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a winning mark.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true if the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}
