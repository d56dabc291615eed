//! Headless rounds between a random human and the engine.

use perfect_play::{Assignment, Mark, Party, RandomTieBreak, RoundController, Score, TieBreak};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Final tally of a self-play run.
#[derive(Debug, Clone, Serialize)]
pub struct SelfplayReport {
    /// Rounds played.
    pub games: u32,
    /// Mark the random human held.
    pub human: Mark,
    /// Seed used for both sides.
    pub seed: u64,
    /// Results from the human's side.
    pub score: Score,
}

/// Plays `games` rounds with a uniformly random human.
#[instrument]
pub fn run(games: u32, seed: u64, human: Mark) -> SelfplayReport {
    let mut human_rng = StdRng::seed_from_u64(seed);
    let mut game = RoundController::with_tie_break(
        Assignment::human_plays(human),
        RandomTieBreak::seeded(seed.wrapping_add(1)),
    );

    for round in 0..games {
        while let Some(party) = game.mover() {
            match party {
                Party::Human => {
                    if !random_human_move(&mut game, &mut human_rng) {
                        warn!(round, board = %game.board(), "Random human could not move");
                        break;
                    }
                }
                Party::Computer => {
                    if game.play_computer_move().is_none() {
                        warn!(round, "Computer could not move");
                        break;
                    }
                }
            }
        }
        debug!(round, outcome = %game.outcome(), board = %game.board(), "Round finished");
        game.restart_round();
    }

    let score = game.score();
    info!(%score, "Self-play finished");
    SelfplayReport {
        games,
        human,
        seed,
        score,
    }
}

/// Plays a uniformly random empty square; false if nothing was played.
fn random_human_move<T: TieBreak>(game: &mut RoundController<T>, rng: &mut StdRng) -> bool {
    let choices = game.board().empty_positions();
    match choices.choose(rng) {
        Some(pos) => game.play_human_move(pos.to_index()),
        None => false,
    }
}
