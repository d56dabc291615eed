//! Scores every candidate move on a given board.

use anyhow::{bail, Context, Result};
use perfect_play::search::{best_moves, score_moves};
use perfect_play::{Board, Mark, Position, ScoredMove};
use serde::Serialize;
use tracing::instrument;

/// Search result for one board.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Board that was searched.
    pub board: Board,
    /// Mark the engine played.
    pub computer: Mark,
    /// Score of every empty square.
    pub scored: Vec<ScoredMove>,
    /// Squares sharing the best score.
    pub best: Vec<Position>,
}

/// Parses `board` and searches it for `computer` (the side to move by default).
#[instrument]
pub fn analyze(board: &str, computer: Option<Mark>) -> Result<Analysis> {
    let board: Board = board.parse().context("parsing board")?;
    if board.winner().is_some() || board.is_full() {
        bail!("board {} is already decided", board);
    }
    let computer = computer.unwrap_or_else(|| side_to_move(&board));

    Ok(Analysis {
        scored: score_moves(&board, computer, computer.opponent()),
        best: best_moves(&board, computer, computer.opponent()),
        board,
        computer,
    })
}

fn side_to_move(board: &Board) -> Mark {
    if board.count(Mark::X) > board.count(Mark::O) {
        Mark::O
    } else {
        Mark::X
    }
}

impl std::fmt::Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board.display())?;
        writeln!(f)?;
        writeln!(f, "{} to move", self.computer)?;
        for scored in &self.scored {
            let marker = if self.best.contains(&scored.position) { "*" } else { " " };
            writeln!(
                f,
                "{} {} {:<14} {:>3}",
                marker,
                scored.position.to_index() + 1,
                scored.position.label(),
                scored.score
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_opening_prefers_corners() {
        let analysis = analyze("....X....", None).unwrap();
        assert_eq!(analysis.computer, Mark::O);
        assert_eq!(analysis.scored.len(), 8);
        assert!(analysis.best.iter().all(|p| p.is_corner()));
        assert_eq!(analysis.best.len(), 4);
    }

    #[test]
    fn test_explicit_computer_mark() {
        let analysis = analyze("XX.OO....", Some(Mark::O)).unwrap();
        assert_eq!(analysis.best, vec![Position::MiddleRight]);
        assert!(analysis.to_string().contains("* 6"));
    }

    #[test]
    fn test_decided_board_is_rejected() {
        assert!(analyze("XXXOO....", None).is_err());
        assert!(analyze("XO", None).is_err());
    }
}
