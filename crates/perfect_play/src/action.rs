//! Move events: rejections, feedback, and planned computer moves.

use super::Position;
use serde::{Deserialize, Serialize};

/// Why a move request was ignored.
///
/// The controller never surfaces these to the player; they exist so the
/// reason can be logged and asserted in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The index is not on the board.
    #[display("Index {} is off the board", index)]
    OutOfBounds {
        /// The requested index.
        index: usize,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", position)]
    SquareOccupied {
        /// The requested square.
        position: Position,
    },

    /// The other party is to move.
    #[display("It is not this party's turn")]
    NotYourTurn,

    /// The round is already over.
    #[display("Round is already over")]
    RoundOver,

    /// The planned move belongs to an earlier round.
    #[display("Planned move from round {} is stale (current round {})", planned, current)]
    StaleTurn {
        /// Round the move was planned for.
        planned: u64,
        /// Round in progress now.
        current: u64,
    },
}

/// Advisory event describing what just happened on the board.
///
/// Exactly one is emitted per applied move: the round result when the move
/// ended the round, otherwise which party moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum MoveKind {
    /// The human placed a mark.
    HumanMoved,
    /// The computer placed a mark.
    ComputerMoved,
    /// The human completed a line.
    RoundWon,
    /// The computer completed a line.
    RoundLost,
    /// The board filled with no line.
    RoundDrawn,
}

impl MoveKind {
    /// True for the three round-ending events.
    pub fn ends_round(&self) -> bool {
        matches!(
            self,
            MoveKind::RoundWon | MoveKind::RoundLost | MoveKind::RoundDrawn
        )
    }
}

/// Receiver of [`MoveKind`] events.
///
/// Implementations must return promptly; the controller calls them inline.
pub trait Feedback: Send {
    /// Called once per applied move.
    fn notify(&self, kind: MoveKind);
}

impl<F> Feedback for F
where
    F: Fn(MoveKind) + Send,
{
    fn notify(&self, kind: MoveKind) {
        self(kind)
    }
}

/// Feedback sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn notify(&self, _kind: MoveKind) {}
}

/// A computer move planned for a specific round.
///
/// The presentation layer holds it while the move delay runs, then hands it
/// back to the controller. A ticket outliving its round is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ComputerTurn {
    round: u64,
    position: Position,
}

impl ComputerTurn {
    /// Round this move was planned for.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Square the computer will take.
    pub fn position(&self) -> Position {
        self.position
    }
}
