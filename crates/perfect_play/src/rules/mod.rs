//! Game rules for tic-tac-toe.

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, completed_lines, Line, WinResult, LINES};
