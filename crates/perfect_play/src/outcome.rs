//! Round outcomes, mark assignment, and the session score.

use super::rules::WinResult;
use super::{Board, Mark};
use serde::{Deserialize, Serialize};

/// The two sides of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Party {
    /// The person at the keyboard.
    Human,
    /// The minimax engine.
    Computer,
}

/// Which mark each party controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    human: Mark,
}

impl Assignment {
    /// The human plays `mark`; the computer plays the other one.
    pub fn human_plays(mark: Mark) -> Self {
        Self { human: mark }
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// The computer's mark.
    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }

    /// The mark controlled by `party`.
    pub fn mark_of(&self, party: Party) -> Mark {
        match party {
            Party::Human => self.human(),
            Party::Computer => self.computer(),
        }
    }

    /// The party controlling `mark`.
    pub fn party_of(&self, mark: Mark) -> Party {
        if mark == self.human {
            Party::Human
        } else {
            Party::Computer
        }
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::human_plays(Mark::X)
    }
}

/// Result of a round, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RoundOutcome {
    /// Moves remain and nobody has a line.
    InProgress,
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// Full board, no line.
    Draw,
}

impl RoundOutcome {
    /// Derives the outcome of `board` under `assignment`.
    pub fn evaluate(board: &Board, assignment: &Assignment) -> Self {
        Self::from_parts(board.winner(), board.is_full(), assignment)
    }

    /// Derives the outcome from an already computed win and fullness.
    pub fn from_parts(win: Option<WinResult>, full: bool, assignment: &Assignment) -> Self {
        match (win, full) {
            (Some(win), _) => match assignment.party_of(win.mark) {
                Party::Human => RoundOutcome::HumanWin,
                Party::Computer => RoundOutcome::ComputerWin,
            },
            (None, true) => RoundOutcome::Draw,
            (None, false) => RoundOutcome::InProgress,
        }
    }

    /// True for every outcome except `InProgress`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }
}

/// Session tally of completed rounds, from the human's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    wins: u32,
    losses: u32,
    draws: u32,
}

impl Score {
    /// Rounds the human won.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Rounds the computer won.
    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Counts one finished round. `InProgress` is ignored.
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::HumanWin => self.wins += 1,
            RoundOutcome::ComputerWin => self.losses += 1,
            RoundOutcome::Draw => self.draws += 1,
            RoundOutcome::InProgress => {}
        }
    }

    /// Total rounds counted.
    pub fn rounds(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wins {} / Losses {} / Draws {}",
            self.wins, self.losses, self.draws
        )
    }
}
