//! Stateless UI rendering for tic-tac-toe.

use super::app::App;
use passplay_tictactoe::{Player, Position, Square, TickScheduler, Urgency, WinLine};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::time::Instant;

/// Renders the whole screen.
pub fn draw<S: TickScheduler>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    let engine = app.session().engine();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Scores and timer
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Passplay - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);

    let status_style = match engine.status().winner() {
        Some(Player::X) => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Some(Player::O) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(app.status_message(Instant::now()))
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    draw_footer(frame, chunks[3], app);

    let help = Paragraph::new("arrows move  enter/1-9 place  r reset  s reset scores  q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Cell size including its border.
const CELL_WIDTH: u16 = 11;
const CELL_HEIGHT: u16 = 3;

fn draw_board<S: TickScheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let [column] = Layout::horizontal([Constraint::Length(CELL_WIDTH * 3)])
        .flex(Flex::Center)
        .areas(area);
    let [grid] = Layout::vertical([Constraint::Length(CELL_HEIGHT * 3)])
        .flex(Flex::Center)
        .areas(column);

    let rows: [Rect; 3] = Layout::vertical([Constraint::Length(CELL_HEIGHT); 3]).areas(grid);
    let winning_line = app.session().engine().winning_line();
    for (row, row_area) in rows.into_iter().enumerate() {
        let cols: [Rect; 3] = Layout::horizontal([Constraint::Length(CELL_WIDTH); 3]).areas(row_area);
        for (col, cell_area) in cols.into_iter().enumerate() {
            if let Some(pos) = Position::from_row_col(row, col) {
                draw_cell(frame, cell_area, app, pos, winning_line);
            }
        }
    }
}

fn draw_cell<S: TickScheduler>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    pos: Position,
    winning_line: Option<WinLine>,
) {
    let square = app.session().engine().board().get(pos);

    let label = format!(" {} ", pos.to_index() + 1);
    let (symbol, base_style) = match square {
        Square::Empty => (label.as_str(), Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if winning_line.is_some_and(|line| line.contains(pos)) {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == app.cursor() {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}

fn draw_footer<S: TickScheduler>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let scores = app.session().engine().scores();
    let score_line = Line::from(vec![
        Span::styled("X ", Style::default().fg(Color::Blue)),
        Span::raw(scores.get(Player::X).to_string()),
        Span::raw("   "),
        Span::styled("O ", Style::default().fg(Color::Red)),
        Span::raw(scores.get(Player::O).to_string()),
    ]);
    let score_panel = Paragraph::new(score_line)
        .alignment(Alignment::Center)
        .block(Block::default().title("Score").borders(Borders::ALL));
    frame.render_widget(score_panel, cols[0]);

    match app.clock() {
        Some((remaining, max)) => {
            let color = match app.session().urgency().unwrap_or(Urgency::Calm) {
                Urgency::Calm => Color::Green,
                Urgency::Warning => Color::Yellow,
                Urgency::Critical => Color::Red,
            };
            let ratio = if max == 0 {
                0.0
            } else {
                (f64::from(remaining) / f64::from(max)).clamp(0.0, 1.0)
            };
            let gauge = Gauge::default()
                .block(Block::default().title("Timer").borders(Borders::ALL))
                .gauge_style(Style::default().fg(color))
                .ratio(ratio)
                .label(format!("{}s", remaining));
            frame.render_widget(gauge, cols[1]);
        }
        None => {
            let off = Paragraph::new("off")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().title("Timer").borders(Borders::ALL));
            frame.render_widget(off, cols[1]);
        }
    }
}
