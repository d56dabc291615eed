//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};

/// One of the eight winning triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    /// Top row.
    pub const TOP_ROW: Line = Line([Position::TopLeft, Position::TopCenter, Position::TopRight]);
    /// Middle row.
    pub const MIDDLE_ROW: Line = Line([
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ]);
    /// Bottom row.
    pub const BOTTOM_ROW: Line = Line([
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ]);
    /// Left column.
    pub const LEFT_COLUMN: Line = Line([
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ]);
    /// Center column.
    pub const CENTER_COLUMN: Line = Line([
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ]);
    /// Right column.
    pub const RIGHT_COLUMN: Line = Line([
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ]);
    /// Top-left to bottom-right.
    pub const DIAGONAL: Line = Line([Position::TopLeft, Position::Center, Position::BottomRight]);
    /// Top-right to bottom-left.
    pub const ANTI_DIAGONAL: Line =
        Line([Position::TopRight, Position::Center, Position::BottomLeft]);

    /// The three positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// Board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// True if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// The mark filling this line, if all three squares hold it.
    pub fn owner(&self, board: &Board) -> Option<Mark> {
        let [a, b, c] = self.0;
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            sq.mark()
        } else {
            None
        }
    }
}

/// All lines in scan order: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    Line::TOP_ROW,
    Line::MIDDLE_ROW,
    Line::BOTTOM_ROW,
    Line::LEFT_COLUMN,
    Line::CENTER_COLUMN,
    Line::RIGHT_COLUMN,
    Line::DIAGONAL,
    Line::ANTI_DIAGONAL,
];

/// A completed line and the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinResult {
    /// The winning mark.
    pub mark: Mark,
    /// The line it completed.
    pub line: Line,
}

/// Checks if there is a winner on the board.
///
/// Returns the first completed line in scan order.
pub fn check_winner(board: &Board) -> Option<WinResult> {
    LINES
        .iter()
        .find_map(|line| line.owner(board).map(|mark| WinResult { mark, line: *line }))
}

/// Every completed line on the board, in scan order.
pub fn completed_lines(board: &Board) -> Vec<WinResult> {
    LINES
        .iter()
        .filter_map(|line| line.owner(board).map(|mark| WinResult { mark, line: *line }))
        .collect()
}
