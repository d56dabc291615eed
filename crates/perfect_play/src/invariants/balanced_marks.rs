//! Balanced marks invariant: the two mark counts never drift apart.

use super::Invariant;
use crate::{Board, Mark};

/// Invariant: the X and O counts differ by at most one.
///
/// Moves alternate, so whichever mark opened can lead by a single square
/// and never more.
pub struct BalancedMarksInvariant;

impl Invariant<Board> for BalancedMarksInvariant {
    fn holds(board: &Board) -> bool {
        board.count(Mark::X).abs_diff(board.count(Mark::O)) <= 1
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one"
    }
}
