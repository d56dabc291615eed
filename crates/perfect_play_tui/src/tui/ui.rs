//! Stateless UI rendering.

use super::app::App;
use crate::preferences::Theme;
use perfect_play::{Line as WinLine, Mark, Position, RoundView, Square};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Colors for one theme.
struct Palette {
    title: Color,
    x: Color,
    o: Color,
    empty: Color,
    grid: Color,
    cursor_fg: Color,
    cursor_bg: Color,
    win_bg: Color,
    status: Color,
}

impl Palette {
    fn of(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                title: Color::Cyan,
                x: Color::LightBlue,
                o: Color::LightRed,
                empty: Color::DarkGray,
                grid: Color::DarkGray,
                cursor_fg: Color::Black,
                cursor_bg: Color::White,
                win_bg: Color::Green,
                status: Color::Yellow,
            },
            Theme::Light => Self {
                title: Color::Blue,
                x: Color::Blue,
                o: Color::Red,
                empty: Color::Gray,
                grid: Color::Gray,
                cursor_fg: Color::White,
                cursor_bg: Color::Black,
                win_bg: Color::LightGreen,
                status: Color::Magenta,
            },
        }
    }

    fn mark(&self, mark: Mark) -> Color {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let view = app.view();
    let palette = Palette::of(app.theme());
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Score
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Perfect Play - Tic Tac Toe")
        .style(Style::default().fg(palette.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], &view, app.cursor(), &palette);

    let sound = if app.sound() { "on" } else { "off" };
    let score = Paragraph::new(format!(
        "You: {}   Computer: {}   {}   |   Sound {}",
        view.assignment.human(),
        view.assignment.computer(),
        view.score,
        sound
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(score, chunks[2]);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(palette.status))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(
        "arrows/1-9 move  enter play  r restart  x/o choose mark  t theme  s sound  q quit",
    )
    .style(Style::default().fg(palette.grid))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, view: &RoundView, cursor: Position, palette: &Palette) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [0, 2, 4].into_iter().zip(0..3) {
        let positions = [
            Position::ALL[chunk * 3],
            Position::ALL[chunk * 3 + 1],
            Position::ALL[chunk * 3 + 2],
        ];
        draw_row(frame, rows[row], view, cursor, palette, &positions);
    }
    draw_separator(frame, rows[1], palette);
    draw_separator(frame, rows[3], palette);
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    view: &RoundView,
    cursor: Position,
    palette: &Palette,
    positions: &[Position; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], view, cursor, palette, positions[0]);
    draw_separator_vertical(frame, cols[1], palette);
    draw_cell(frame, cols[2], view, cursor, palette, positions[1]);
    draw_separator_vertical(frame, cols[3], palette);
    draw_cell(frame, cols[4], view, cursor, palette, positions[2]);
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    view: &RoundView,
    cursor: Position,
    palette: &Palette,
    pos: Position,
) {
    let label = (pos.to_index() + 1).to_string();
    let (symbol, base_style) = match view.board.get(pos) {
        Square::Empty => (label, Style::default().fg(palette.empty)),
        Square::Occupied(mark) => (
            mark.to_string(),
            Style::default().fg(palette.mark(mark)).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if on_line(view.winning_line, pos) {
        base_style.bg(palette.win_bg).fg(palette.cursor_fg)
    } else if pos == cursor && view.mover.is_some() {
        base_style.bg(palette.cursor_bg).fg(palette.cursor_fg)
    } else {
        base_style
    };

    // One row of padding above the symbol keeps it vertically centered.
    let text = vec![Line::default(), Line::from(Span::styled(format!(" {} ", symbol), style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn on_line(line: Option<WinLine>, pos: Position) -> bool {
    line.is_some_and(|line| line.contains(pos))
}

fn draw_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new("─".repeat(area.width as usize)).style(Style::default().fg(palette.grid));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(palette.grid));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
