//! Application state and logic.

use super::input::{move_cursor, Intent};
use super::scheduler::ScheduledMove;
use crate::config::GameConfig;
use crate::preferences::{Preferences, Theme};
use perfect_play::{
    Assignment, ComputerTurn, Mark, MoveKind, Position, RandomTieBreak, RoundController,
    RoundOutcome, RoundState, RoundView,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, instrument};

/// Main application state.
pub struct App {
    game: RoundController,
    cursor: Position,
    theme: Theme,
    sound: bool,
    delay: Duration,
    preferences_path: PathBuf,
    pending: Option<ScheduledMove>,
    turn_tx: UnboundedSender<ComputerTurn>,
    turn_rx: UnboundedReceiver<ComputerTurn>,
    feedback_rx: UnboundedReceiver<MoveKind>,
    last_event: Option<MoveKind>,
    cues: usize,
    quit: bool,
}

impl App {
    /// Creates the application from resolved configuration.
    ///
    /// A stored theme preference wins over the configured one.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        let tie_break = match config.seed() {
            Some(seed) => RandomTieBreak::seeded(*seed),
            None => RandomTieBreak::from_entropy(),
        };
        let (feedback_tx, feedback_rx) = mpsc::unbounded_channel();
        let game = RoundController::with_tie_break(
            Assignment::human_plays(*config.human_mark()),
            tie_break,
        )
        .with_feedback(move |kind: MoveKind| {
            let _ = feedback_tx.send(kind);
        });

        let theme = Preferences::stored_theme(config.preferences_path()).unwrap_or(*config.theme());
        let (turn_tx, turn_rx) = mpsc::unbounded_channel();
        info!(%theme, sound = config.sound(), "App ready");

        Self {
            game,
            cursor: Position::Center,
            theme,
            sound: *config.sound(),
            delay: Duration::from_millis(*config.computer_delay_ms()),
            preferences_path: config.preferences_path().clone(),
            pending: None,
            turn_tx,
            turn_rx,
            feedback_rx,
            last_event: None,
            cues: 0,
            quit: false,
        }
    }

    /// Snapshot of the round for rendering.
    pub fn view(&self) -> RoundView {
        self.game.view()
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether round-end cues are on.
    pub fn sound(&self) -> bool {
        self.sound
    }

    /// True once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while a computer move is waiting for its delay.
    pub fn computer_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// One-line description of what is going on.
    pub fn status_message(&self) -> String {
        match self.game.state() {
            RoundState::AwaitingHuman => match self.last_event {
                Some(MoveKind::ComputerMoved) => {
                    format!("Computer moved. Your turn ({})", self.game.assignment().human())
                }
                _ => format!("Your turn ({})", self.game.assignment().human()),
            },
            RoundState::AwaitingComputer => "Computer is thinking...".to_string(),
            RoundState::RoundOver(RoundOutcome::HumanWin) => {
                "You win! Press 'r' to play again.".to_string()
            }
            RoundState::RoundOver(RoundOutcome::ComputerWin) => {
                "Computer wins. Press 'r' to play again.".to_string()
            }
            RoundState::RoundOver(_) => "Draw. Press 'r' to play again.".to_string(),
        }
    }

    /// Applies a key intent.
    #[instrument(skip(self), fields(round = self.game.round()))]
    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::Cursor(key) => self.cursor = move_cursor(self.cursor, key),
            Intent::PlayCursor => self.play(self.cursor.to_index()),
            Intent::Play(index) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.play(index);
            }
            Intent::Restart => {
                self.cancel_pending();
                self.game.restart_round();
                self.last_event = None;
            }
            Intent::Choose(mark) => self.choose(mark),
            Intent::ToggleTheme => {
                self.theme = self.theme.toggled();
                info!(theme = %self.theme, "Theme toggled");
                Preferences::remember_theme(&self.preferences_path, self.theme);
            }
            Intent::ToggleSound => {
                self.sound = !self.sound;
                info!(sound = self.sound, "Sound toggled");
            }
            Intent::Quit => {
                info!("User quit");
                self.cancel_pending();
                self.quit = true;
            }
        }
        self.drain_feedback();
    }

    /// Plays a computer move delivered by the scheduler.
    #[instrument(skip(self))]
    pub fn on_computer_turn(&mut self, turn: ComputerTurn) {
        if self.pending.as_ref().is_some_and(|p| p.turn() == turn) {
            self.pending = None;
        }
        self.game.apply_computer_move(turn);
        self.drain_feedback();
    }

    /// Handles every computer move that has already arrived.
    pub fn pump(&mut self) {
        while let Ok(turn) = self.turn_rx.try_recv() {
            self.on_computer_turn(turn);
        }
    }

    /// Waits for the next scheduled computer move and plays it.
    pub async fn await_computer(&mut self) -> bool {
        if self.pending.is_none() {
            return false;
        }
        match self.turn_rx.recv().await {
            Some(turn) => {
                self.on_computer_turn(turn);
                true
            }
            None => false,
        }
    }

    /// Number of bells to ring, resetting the count.
    pub fn take_cues(&mut self) -> usize {
        std::mem::take(&mut self.cues)
    }

    fn play(&mut self, index: usize) {
        if !self.game.play_human_move(index) {
            return;
        }
        if let Some(turn) = self.game.plan_computer_move() {
            self.pending = Some(ScheduledMove::schedule(turn, self.delay, self.turn_tx.clone()));
        }
    }

    fn choose(&mut self, mark: Mark) {
        debug!(%mark, "Human chose mark");
        self.cancel_pending();
        self.game.set_human_mark(mark);
        self.last_event = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    fn drain_feedback(&mut self) {
        while let Ok(kind) = self.feedback_rx.try_recv() {
            if kind.ends_round() && self.sound {
                self.cues += 1;
            }
            self.last_event = Some(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PlayArgs;

    fn app_in(dir: &tempfile::TempDir) -> App {
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "computer_delay_ms = 0\nseed = 1\npreferences_path = {:?}\n",
                dir.path().join("prefs.toml")
            ),
        )
        .unwrap();
        let config = GameConfig::from_file(&path)
            .unwrap()
            .with_overrides(&PlayArgs::default());
        App::new(&config)
    }

    #[tokio::test]
    async fn test_human_move_schedules_computer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle(Intent::Play(4));
        assert!(app.computer_pending());
        assert_eq!(app.view().state, RoundState::AwaitingComputer);

        assert!(app.await_computer().await);
        assert!(!app.computer_pending());
        assert_eq!(app.view().board.filled(), 2);
        assert_eq!(app.view().state, RoundState::AwaitingHuman);
    }

    #[tokio::test]
    async fn test_restart_cancels_pending_move() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle(Intent::Play(4));
        app.handle(Intent::Restart);

        assert!(!app.computer_pending());
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.pump();
        assert_eq!(app.view().board.filled(), 0);
        assert_eq!(app.view().state, RoundState::AwaitingHuman);
    }

    #[tokio::test]
    async fn test_choose_mark_resets_round() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle(Intent::Play(0));
        app.handle(Intent::Choose(Mark::O));

        let view = app.view();
        assert_eq!(view.board.filled(), 0);
        assert_eq!(view.assignment.human(), Mark::O);
        assert!(!app.computer_pending());
    }

    #[tokio::test]
    async fn test_theme_toggle_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.theme(), Theme::Dark);

        app.handle(Intent::ToggleTheme);
        assert_eq!(app.theme(), Theme::Light);

        let reopened = app_in(&dir);
        assert_eq!(reopened.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn test_round_end_rings_once_when_sound_on() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        // Ignore the engine's threats until it completes a line.
        for index in [4, 8, 5, 6, 7, 1, 2, 3, 0] {
            if app.view().state == RoundState::AwaitingHuman {
                app.handle(Intent::Play(index));
                app.await_computer().await;
            }
        }
        assert!(matches!(app.view().state, RoundState::RoundOver(_)));
        assert_eq!(app.take_cues(), 1);
        assert_eq!(app.take_cues(), 0);
    }

    #[tokio::test]
    async fn test_muted_round_end_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.handle(Intent::ToggleSound);
        assert!(!app.sound());

        for index in [4, 8, 5, 6, 7, 1, 2, 3, 0] {
            if app.view().state == RoundState::AwaitingHuman {
                app.handle(Intent::Play(index));
                app.await_computer().await;
            }
        }
        assert_eq!(app.take_cues(), 0);
    }

    #[tokio::test]
    async fn test_quit_sets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.handle(Intent::Quit);
        assert!(app.should_quit());
    }
}
