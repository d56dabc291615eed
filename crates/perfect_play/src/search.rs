//! Exhaustive minimax search for the computer's move.
//!
//! The 3x3 board is small enough to search every line of play to the end,
//! so there is no pruning and no heuristic evaluation. Terminal states are
//! scored from the computer's point of view:
//!
//! - computer completes a line: `10 - depth`
//! - human completes a line: `depth - 10`
//! - full board, no line: `0`
//!
//! `depth` counts moves made since the search root, so faster wins and
//! slower losses score better.
//!
//! Several root moves often share the best score. [`best_moves`] returns all
//! of them; [`Minimax::best_move`] hands that set to a [`TieBreak`], which is
//! the only source of non-determinism in the engine.

use super::{Board, Mark, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Score of a win found at depth zero.
pub const WIN_SCORE: i32 = 10;

/// A root candidate and its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ScoredMove {
    /// Where the computer would play.
    pub position: Position,
    /// Minimax value of playing there.
    pub score: i32,
}

/// Picks one move among equally good candidates.
pub trait TieBreak {
    /// Chooses from `candidates`; `None` only when the slice is empty.
    fn choose(&mut self, candidates: &[Position]) -> Option<Position>;
}

impl<T: TieBreak + ?Sized> TieBreak for Box<T> {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        (**self).choose(candidates)
    }
}

impl<T: TieBreak + ?Sized> TieBreak for &mut T {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        (**self).choose(candidates)
    }
}

/// Uniform choice backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomTieBreak<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomTieBreak<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomTieBreak<StdRng> {
    /// Seeds from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TieBreak for RandomTieBreak<R> {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        candidates.choose(&mut self.rng).copied()
    }
}

/// Always takes the lowest-index candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl TieBreak for FirstCandidate {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        candidates.first().copied()
    }
}

/// The computer's decision engine.
#[derive(Debug, Clone)]
pub struct Minimax<T> {
    tie_break: T,
}

impl<T: TieBreak> Minimax<T> {
    /// Creates an engine that settles ties with `tie_break`.
    pub fn new(tie_break: T) -> Self {
        Self { tie_break }
    }

    /// Selects an optimal move for `computer`.
    ///
    /// Returns `None` if the board is full or already won. The board is
    /// never modified; search runs on a private copy.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn best_move(&mut self, board: &Board, computer: Mark, human: Mark) -> Option<Position> {
        let candidates = best_moves(board, computer, human);
        let chosen = self.tie_break.choose(&candidates);
        debug!(?candidates, ?chosen, "Selected computer move");
        chosen
    }
}

/// Scores every empty square as a computer placement, in index order.
///
/// Empty when the board is full or already won.
pub fn score_moves(board: &Board, computer: Mark, human: Mark) -> Vec<ScoredMove> {
    if board.winner().is_some() {
        return Vec::new();
    }

    let mut scratch = board.clone();
    let scored: Vec<ScoredMove> = Position::ALL
        .into_iter()
        .filter(|pos| board.is_empty(*pos))
        .map(|pos| {
            scratch.place(pos, computer);
            let score = minimax(&mut scratch, computer, human, 1, false);
            scratch.clear(pos);
            ScoredMove::new(pos, score)
        })
        .collect();

    trace!(?scored, "Root scores");
    scored
}

/// Every root move that achieves the maximum score, in index order.
pub fn best_moves(board: &Board, computer: Mark, human: Mark) -> Vec<Position> {
    let scored = score_moves(board, computer, human);
    let Some(best) = scored.iter().map(|m| m.score).max() else {
        return Vec::new();
    };
    scored
        .into_iter()
        .filter(|m| m.score == best)
        .map(|m| m.position)
        .collect()
}

fn minimax(scratch: &mut Board, computer: Mark, human: Mark, depth: i32, maximizing: bool) -> i32 {
    if let Some(win) = scratch.winner() {
        return if win.mark == computer {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }
    if scratch.is_full() {
        return 0;
    }

    let (mark, mut best) = if maximizing {
        (computer, i32::MIN)
    } else {
        (human, i32::MAX)
    };

    for pos in Position::ALL {
        if !scratch.is_empty(pos) {
            continue;
        }
        scratch.place(pos, mark);
        let score = minimax(scratch, computer, human, depth + 1, !maximizing);
        scratch.clear(pos);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
