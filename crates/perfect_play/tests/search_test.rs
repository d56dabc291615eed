//! Tests for the minimax engine.

use perfect_play::search::{best_moves, score_moves};
use perfect_play::{Board, FirstCandidate, Mark, Minimax, Position, RandomTieBreak};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn side_to_move(board: &Board) -> Mark {
    if board.count(Mark::X) == board.count(Mark::O) {
        Mark::X
    } else {
        Mark::O
    }
}

/// Reachable, undecided boards with at least `min_filled` marks.
fn open_positions(min_filled: usize) -> Vec<Board> {
    fn walk(board: &mut Board, to_move: Mark, min_filled: usize, out: &mut HashSet<Board>) {
        if board.winner().is_some() || board.is_full() {
            return;
        }
        if board.filled() >= min_filled {
            out.insert(board.clone());
        }
        for pos in Position::ALL {
            if board.is_empty(pos) {
                board.place(pos, to_move);
                walk(board, to_move.opponent(), min_filled, out);
                board.clear(pos);
            }
        }
    }

    let mut out = HashSet::new();
    walk(&mut Board::new(), Mark::X, min_filled, &mut out);
    out.into_iter().collect()
}

#[test]
fn test_center_opening_answered_with_corner() {
    let board: Board = "....X....".parse().unwrap();
    assert_eq!(
        best_moves(&board, Mark::O, Mark::X),
        vec![
            Position::TopLeft,
            Position::TopRight,
            Position::BottomLeft,
            Position::BottomRight
        ]
    );

    for seed in 0..20 {
        let mut engine = Minimax::new(RandomTieBreak::new(ChaCha8Rng::seed_from_u64(seed)));
        let reply = engine.best_move(&board, Mark::O, Mark::X).unwrap();
        assert!(reply.is_corner(), "seed {seed} replied {reply}");
    }
}

#[test]
fn test_edge_replies_to_center_lose() {
    let board: Board = "....X....".parse().unwrap();
    for scored in score_moves(&board, Mark::O, Mark::X) {
        if scored.position.is_corner() {
            assert_eq!(scored.score, 0, "{scored:?}");
        } else {
            assert!(scored.score < 0, "{scored:?}");
        }
    }
}

#[test]
fn test_random_tie_break_covers_candidates() {
    let board: Board = "....X....".parse().unwrap();
    let mut engine = Minimax::new(RandomTieBreak::new(ChaCha8Rng::seed_from_u64(42)));
    let mut seen = HashSet::new();
    for _ in 0..60 {
        seen.insert(engine.best_move(&board, Mark::O, Mark::X).unwrap());
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn test_best_move_never_occupied() {
    let mut engine = Minimax::new(FirstCandidate);
    for board in open_positions(2) {
        let to_move = side_to_move(&board);
        let chosen = engine
            .best_move(&board, to_move, to_move.opponent())
            .expect("open board has a move");
        assert!(board.is_empty(chosen), "board {board} chose {chosen}");
    }
}

#[test]
fn test_winning_move_is_taken_when_available() {
    for board in open_positions(4) {
        let to_move = side_to_move(&board);
        let immediate: Vec<Position> = board
            .empty_positions()
            .into_iter()
            .filter(|pos| {
                let mut next = board.clone();
                next.place(*pos, to_move);
                next.winner().is_some()
            })
            .collect();
        if immediate.is_empty() {
            continue;
        }
        let best = best_moves(&board, to_move, to_move.opponent());
        assert_eq!(best, immediate, "board {board}");
    }
}
