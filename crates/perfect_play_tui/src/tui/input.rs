//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use perfect_play::{Mark, Position};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move the cursor.
    Cursor(KeyCode),
    /// Play at the cursor.
    PlayCursor,
    /// Play at a board index.
    Play(usize),
    /// Start a fresh round.
    Restart,
    /// Switch the human to `Mark`.
    Choose(Mark),
    /// Flip the color theme.
    ToggleTheme,
    /// Flip the terminal bell.
    ToggleSound,
    /// Leave the game.
    Quit,
}

/// Maps a key event to an intent; `None` for keys we ignore.
pub fn intent(key: KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Intent::Cursor(key.code)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::PlayCursor),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Intent::Play(d as usize - 1)),
        KeyCode::Char('r') => Some(Intent::Restart),
        KeyCode::Char('x') => Some(Intent::Choose(Mark::X)),
        KeyCode::Char('o') => Some(Intent::Choose(Mark::O)),
        KeyCode::Char('t') => Some(Intent::ToggleTheme),
        KeyCode::Char('s') => Some(Intent::ToggleSound),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Down), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Left), Position::BottomCenter);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::MiddleRight, KeyCode::Right), Position::MiddleRight);
    }

    #[test]
    fn test_digit_keys_map_to_indices() {
        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(intent(press('1')), Some(Intent::Play(0)));
        assert_eq!(intent(press('9')), Some(Intent::Play(8)));
        assert_eq!(intent(press('0')), None);
        assert_eq!(intent(press('o')), Some(Intent::Choose(Mark::O)));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(intent(key), Some(Intent::Quit));
    }
}
