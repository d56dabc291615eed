//! Perfect Play - tic-tac-toe against an opponent that never loses.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Square`], [`Mark`], [`Position`], plus the
//!   win/draw rules in [`rules`]
//! - **Search engine**: exhaustive minimax in [`search`], with ties settled
//!   by an injected [`TieBreak`]
//! - **Round controller**: [`RoundController`] owns the board, whose turn it
//!   is, and the session [`Score`]
//!
//! Presentation (rendering, input, move delay, sound) lives outside this
//! crate and talks to the controller through plain method calls and the
//! [`Feedback`] sink.
//!
//! # Example
//!
//! ```
//! use perfect_play::{Assignment, FirstCandidate, Mark, RoundController, RoundState};
//!
//! let mut game = RoundController::with_tie_break(Assignment::human_plays(Mark::X), FirstCandidate);
//! assert!(game.play_human_move(4));
//! assert_eq!(game.state(), RoundState::AwaitingComputer);
//!
//! let turn = game.plan_computer_move().expect("computer to move");
//! assert!(turn.position().is_corner());
//! assert!(game.apply_computer_move(turn));
//! assert_eq!(game.state(), RoundState::AwaitingHuman);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod controller;
pub mod invariants;
mod outcome;
mod position;
pub mod rules;
pub mod search;
mod types;

pub use action::{ComputerTurn, Feedback, MoveError, MoveKind, NoFeedback};
pub use controller::{RoundController, RoundState, RoundView};
pub use outcome::{Assignment, Party, RoundOutcome, Score};
pub use position::Position;
pub use rules::{Line, WinResult};
pub use search::{FirstCandidate, Minimax, RandomTieBreak, ScoredMove, TieBreak};
pub use types::{Board, BoardParseError, Mark, Square};
