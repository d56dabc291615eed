//! Round controller: the authoritative game state.
//!
//! The controller owns the board, the mark assignment and the session score.
//! It is a small state machine:
//!
//! ```text
//! AwaitingHuman --human move--> AwaitingComputer --computer move--> AwaitingHuman
//!       \                              \
//!        `--win/draw--> RoundOver <-----'
//! ```
//!
//! `RoundOver` is left only through [`RoundController::restart_round`] or
//! [`RoundController::set_human_mark`]. Requests that do not fit the current
//! state are ignored and leave everything unchanged.
//!
//! The computer's move is split in two so the presentation layer can delay
//! it: [`RoundController::plan_computer_move`] runs the search and returns a
//! [`ComputerTurn`] stamped with the current round, and
//! [`RoundController::apply_computer_move`] plays it later. Restarting bumps
//! the round, so a ticket planned before the restart is discarded.

use super::action::{ComputerTurn, Feedback, MoveError, MoveKind, NoFeedback};
use super::invariants::{BoardInvariants, InvariantSet};
use super::outcome::{Assignment, Party, RoundOutcome, Score};
use super::rules::{Line, WinResult};
use super::search::{Minimax, RandomTieBreak, TieBreak};
use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Where the round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// Waiting for the human to pick a square.
    AwaitingHuman,
    /// The computer is to move.
    AwaitingComputer,
    /// The round ended; only restart or reassignment leave this state.
    RoundOver(RoundOutcome),
}

impl RoundState {
    /// The party to move, if any.
    pub fn mover(&self) -> Option<Party> {
        match self {
            RoundState::AwaitingHuman => Some(Party::Human),
            RoundState::AwaitingComputer => Some(Party::Computer),
            RoundState::RoundOver(_) => None,
        }
    }
}

/// Everything a renderer needs, as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    /// Current board.
    pub board: Board,
    /// State machine position.
    pub state: RoundState,
    /// Party to move, `None` once the round is over.
    pub mover: Option<Party>,
    /// Outcome derived from the board.
    pub outcome: RoundOutcome,
    /// Line to highlight, if a mark completed one.
    pub winning_line: Option<Line>,
    /// Session tally.
    pub score: Score,
    /// Which mark each party holds.
    pub assignment: Assignment,
    /// Round counter, bumped on every reset.
    pub round: u64,
}

/// Orchestrates turns between the human and the engine.
pub struct RoundController<T = RandomTieBreak> {
    board: Board,
    assignment: Assignment,
    state: RoundState,
    win: Option<WinResult>,
    score: Score,
    round: u64,
    scored_round: Option<u64>,
    engine: Minimax<T>,
    feedback: Box<dyn Feedback>,
}

impl RoundController<RandomTieBreak> {
    /// Creates a controller whose engine breaks ties with OS entropy.
    pub fn new(assignment: Assignment) -> Self {
        Self::with_tie_break(assignment, RandomTieBreak::from_entropy())
    }
}

impl<T: TieBreak> RoundController<T> {
    /// Creates a controller with an explicit tie-breaker.
    #[instrument(skip(tie_break))]
    pub fn with_tie_break(assignment: Assignment, tie_break: T) -> Self {
        info!(human = %assignment.human(), "Creating round controller");
        Self {
            board: Board::new(),
            assignment,
            state: RoundState::AwaitingHuman,
            win: None,
            score: Score::default(),
            round: 0,
            scored_round: None,
            engine: Minimax::new(tie_break),
            feedback: Box::new(NoFeedback),
        }
    }

    /// Routes move events to `feedback`.
    pub fn with_feedback(mut self, feedback: impl Feedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Party to move, `None` once the round is over.
    pub fn mover(&self) -> Option<Party> {
        self.state.mover()
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> RoundOutcome {
        match self.state {
            RoundState::RoundOver(outcome) => outcome,
            _ => RoundOutcome::InProgress,
        }
    }

    /// Completed line and its mark, if any.
    pub fn win(&self) -> Option<WinResult> {
        self.win
    }

    /// Line to highlight, if any.
    pub fn winning_line(&self) -> Option<Line> {
        self.win.map(|w| w.line)
    }

    /// Session tally.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Mark assignment.
    pub fn assignment(&self) -> Assignment {
        self.assignment
    }

    /// Round counter.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> RoundView {
        RoundView {
            board: self.board.clone(),
            state: self.state,
            mover: self.mover(),
            outcome: self.outcome(),
            winning_line: self.winning_line(),
            score: self.score,
            assignment: self.assignment,
            round: self.round,
        }
    }

    /// Plays the human's mark at `index`, ignoring illegal requests.
    ///
    /// Returns whether the move was applied.
    pub fn play_human_move(&mut self, index: usize) -> bool {
        match self.try_play_human_move(index) {
            Ok(_) => true,
            Err(e) => {
                debug!(index, reason = %e, "Ignored human move");
                false
            }
        }
    }

    /// Plays the human's mark at `index`, reporting why a move was refused.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn try_play_human_move(&mut self, index: usize) -> Result<MoveKind, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::OutOfBounds { index })?;
        match self.state {
            RoundState::AwaitingHuman => {}
            RoundState::AwaitingComputer => return Err(MoveError::NotYourTurn),
            RoundState::RoundOver(_) => return Err(MoveError::RoundOver),
        }
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied { position });
        }
        Ok(self.apply(position, Party::Human))
    }

    /// Runs the search and returns the computer's move for this round.
    ///
    /// `None` unless the computer is to move.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn plan_computer_move(&mut self) -> Option<ComputerTurn> {
        if self.state != RoundState::AwaitingComputer {
            debug!(state = ?self.state, "No computer move to plan");
            return None;
        }

        let computer = self.assignment.computer();
        let human = self.assignment.human();
        match self.engine.best_move(&self.board, computer, human) {
            Some(position) => Some(ComputerTurn::new(self.round, position)),
            None => {
                warn!(board = %self.board, "Search found no move");
                None
            }
        }
    }

    /// Plays a planned computer move, discarding stale or misplaced tickets.
    ///
    /// Returns whether the move was applied.
    pub fn apply_computer_move(&mut self, turn: ComputerTurn) -> bool {
        match self.try_apply_computer_move(turn) {
            Ok(_) => true,
            Err(e) => {
                debug!(?turn, reason = %e, "Discarded computer move");
                false
            }
        }
    }

    /// Plays a planned computer move, reporting why it was refused.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn try_apply_computer_move(&mut self, turn: ComputerTurn) -> Result<MoveKind, MoveError> {
        if turn.round() != self.round {
            return Err(MoveError::StaleTurn {
                planned: turn.round(),
                current: self.round,
            });
        }
        match self.state {
            RoundState::AwaitingComputer => {}
            RoundState::AwaitingHuman => return Err(MoveError::NotYourTurn),
            RoundState::RoundOver(_) => return Err(MoveError::RoundOver),
        }
        let position = turn.position();
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied { position });
        }
        Ok(self.apply(position, Party::Computer))
    }

    /// Plans and applies the computer's move with no delay.
    pub fn play_computer_move(&mut self) -> Option<MoveKind> {
        let turn = self.plan_computer_move()?;
        self.try_apply_computer_move(turn).ok()
    }

    /// Starts a fresh round with the same assignment.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn restart_round(&mut self) {
        self.reset();
        info!(round = self.round, "Round restarted");
    }

    /// Gives the human `mark` and starts a fresh round.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn set_human_mark(&mut self, mark: Mark) {
        self.assignment = Assignment::human_plays(mark);
        self.reset();
        info!(round = self.round, human = %mark, "Marks reassigned");
    }

    /// Recomputes the outcome from the board.
    ///
    /// Safe to call any number of times; a finished round is scored once.
    pub fn refresh(&mut self) -> RoundOutcome {
        let outcome = self.recompute();
        if outcome.is_terminal() {
            self.finish(outcome);
        }
        outcome
    }

    fn reset(&mut self) {
        self.board = Board::new();
        self.state = RoundState::AwaitingHuman;
        self.win = None;
        self.round += 1;
    }

    fn apply(&mut self, position: Position, party: Party) -> MoveKind {
        let mark = self.assignment.mark_of(party);
        self.board.place(position, mark);
        debug!(%party, %mark, %position, "Move applied");
        self.check_invariants();

        let outcome = self.recompute();
        let kind = if outcome.is_terminal() {
            self.finish(outcome);
            match outcome {
                RoundOutcome::HumanWin => MoveKind::RoundWon,
                RoundOutcome::ComputerWin => MoveKind::RoundLost,
                _ => MoveKind::RoundDrawn,
            }
        } else {
            match party {
                Party::Human => {
                    self.state = RoundState::AwaitingComputer;
                    MoveKind::HumanMoved
                }
                Party::Computer => {
                    self.state = RoundState::AwaitingHuman;
                    MoveKind::ComputerMoved
                }
            }
        };

        self.feedback.notify(kind);
        kind
    }

    fn recompute(&mut self) -> RoundOutcome {
        self.win = self.board.winner();
        RoundOutcome::from_parts(self.win, self.board.is_full(), &self.assignment)
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.state = RoundState::RoundOver(outcome);
        if self.scored_round == Some(self.round) {
            return;
        }
        self.scored_round = Some(self.round);
        self.score.record(outcome);
        info!(%outcome, score = %self.score, "Round over");
    }

    fn check_invariants(&self) {
        let checked = BoardInvariants::check_all(&self.board);
        if let Err(violations) = &checked {
            error!(board = %self.board, ?violations, "Board invariants violated");
        }
        debug_assert!(checked.is_ok(), "Board invariants violated: {checked:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FirstCandidate;
    use std::sync::{Arc, Mutex};

    fn controller() -> RoundController<FirstCandidate> {
        RoundController::with_tie_break(Assignment::default(), FirstCandidate)
    }

    #[test]
    fn test_human_move_hands_turn_to_computer() {
        let mut game = controller();
        assert_eq!(game.try_play_human_move(4), Ok(MoveKind::HumanMoved));
        assert_eq!(game.state(), RoundState::AwaitingComputer);
        assert_eq!(game.board().get(Position::Center), crate::Square::Occupied(Mark::X));
    }

    #[test]
    fn test_illegal_moves_are_ignored() {
        let mut game = controller();
        assert_eq!(
            game.try_play_human_move(9),
            Err(MoveError::OutOfBounds { index: 9 })
        );
        game.play_human_move(0);
        let before = game.view();

        assert_eq!(game.try_play_human_move(1), Err(MoveError::NotYourTurn));
        assert!(!game.play_human_move(1));
        assert_eq!(game.view(), before);
    }

    #[test]
    fn test_occupied_square_is_ignored() {
        let mut game = controller();
        game.play_human_move(0);
        game.play_computer_move();
        let before = game.view();
        assert_eq!(
            game.try_play_human_move(0),
            Err(MoveError::SquareOccupied {
                position: Position::TopLeft
            })
        );
        assert_eq!(game.view(), before);
    }

    #[test]
    fn test_plan_only_on_computer_turn() {
        let mut game = controller();
        assert_eq!(game.plan_computer_move(), None);
        game.play_human_move(4);
        let turn = game.plan_computer_move().unwrap();
        assert_eq!(turn.round(), game.round());
        assert!(turn.position().is_corner());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut game = controller();
        game.play_human_move(4);
        let turn = game.plan_computer_move().unwrap();

        game.restart_round();
        game.play_human_move(4);

        assert!(matches!(
            game.try_apply_computer_move(turn),
            Err(MoveError::StaleTurn { .. })
        ));
        assert_eq!(game.board().filled(), 1);
        assert_eq!(game.state(), RoundState::AwaitingComputer);
    }

    #[test]
    fn test_ticket_applies_once() {
        let mut game = controller();
        game.play_human_move(4);
        let turn = game.plan_computer_move().unwrap();
        assert!(game.apply_computer_move(turn));
        assert!(!game.apply_computer_move(turn));
        assert_eq!(game.board().filled(), 2);
    }

    #[test]
    fn test_feedback_receives_one_event_per_move() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let mut game = controller().with_feedback(move |kind: MoveKind| {
            sink.lock().unwrap().push(kind);
        });

        game.play_human_move(4);
        game.play_computer_move();
        game.play_human_move(4);

        assert_eq!(
            *events.lock().unwrap(),
            vec![MoveKind::HumanMoved, MoveKind::ComputerMoved]
        );
    }

    #[test]
    fn test_human_completing_top_row_wins() {
        let mut game = controller();
        game.board = "XX.OO....".parse().unwrap();

        assert_eq!(game.try_play_human_move(2), Ok(MoveKind::RoundWon));
        assert_eq!(game.state(), RoundState::RoundOver(RoundOutcome::HumanWin));
        assert_eq!(game.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
        assert_eq!(game.win().map(|w| w.mark), Some(Mark::X));
        assert_eq!(game.score().wins(), 1);

        game.refresh();
        assert_eq!(game.score().wins(), 1);
        assert_eq!(game.score().rounds(), 1);
        assert_eq!(game.plan_computer_move(), None);
    }

    #[test]
    fn test_refresh_does_not_double_count() {
        let mut game = controller();
        // Computer takes the top row while the human scatters.
        for index in [4, 8, 5, 6, 7] {
            if game.mover() == Some(Party::Human) {
                game.play_human_move(index);
                game.play_computer_move();
            }
        }
        assert!(matches!(game.state(), RoundState::RoundOver(_)));
        let score = game.score();
        assert_eq!(score.rounds(), 1);

        game.refresh();
        game.refresh();
        assert_eq!(game.score(), score);
    }
}
