//! Core domain types for tic-tac-toe.

use super::position::Position;
use super::rules::{self, WinResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A mark placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X.
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    /// Single-character form used by the textual board notation.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from raw squares (row-major).
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Places a mark at the given position.
    pub fn place(&mut self, pos: Position, mark: Mark) {
        self.set(pos, Square::Occupied(mark));
    }

    /// Clears the given position.
    pub fn clear(&mut self, pos: Position) {
        self.set(pos, Square::Empty);
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Number of occupied squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// True iff no square is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// First completed line in scan order, if any.
    pub fn winner(&self) -> Option<WinResult> {
        rules::check_winner(self)
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in &self.squares {
            write!(f, "{}", square.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing the textual board notation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    /// Wrong number of squares.
    #[display("Expected 9 squares, found {}", found)]
    WrongLength {
        /// Number of squares found.
        found: usize,
    },

    /// Unrecognized square character.
    #[display("Invalid square {:?} at index {}", symbol, index)]
    InvalidSquare {
        /// The offending character.
        symbol: char,
        /// Index of the square.
        index: usize,
    },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `"XX.OO...."`-style notation.
    ///
    /// `.`, `-`, `_` and space mean empty; `/` and `|` are ignored so rows
    /// may be separated (`"XX./OO./..."`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !matches!(c, '/' | '|')).collect();
        if symbols.len() != 9 {
            return Err(BoardParseError::WrongLength {
                found: symbols.len(),
            });
        }

        let mut squares = [Square::Empty; 9];
        for (index, symbol) in symbols.into_iter().enumerate() {
            squares[index] = match symbol {
                '.' | '-' | '_' | ' ' => Square::Empty,
                'x' | 'X' => Square::Occupied(Mark::X),
                'o' | 'O' => Square::Occupied(Mark::O),
                _ => return Err(BoardParseError::InvalidSquare { symbol, index }),
            };
        }
        Ok(Self { squares })
    }
}
