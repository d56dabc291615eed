//! Single winner invariant: at most one mark owns a completed line.

use super::Invariant;
use crate::rules::completed_lines;
use crate::Board;

/// Invariant: completed lines never belong to both marks.
///
/// Unreachable under alternating play, since the round stops at the first
/// completed line. `check_winner` reports the first line in scan order and
/// does not arbitrate this case.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        let lines = completed_lines(board);
        lines.windows(2).all(|pair| pair[0].mark == pair[1].mark)
    }

    fn description() -> &'static str {
        "At most one mark owns a completed line"
    }
}
