//! Full-size image preview overlay.
//!
//! Opened on demand for any rendered image; dismissed by input directed at
//! the overlay (Esc or Enter), never by unrelated key presses.

use banter_client::Client;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::view::{ImageLoad, ViewState};

/// Render the preview overlay above the chat layout.
pub fn render(frame: &mut Frame, client: &Client, view: &ViewState) {
    let Some(index) = view.preview() else {
        return;
    };
    let Some(overlay) = centered_rect(frame.area(), 60, 50) else {
        return;
    };

    frame.render_widget(Clear, overlay);
    let block = Block::default().borders(Borders::ALL).title(" image preview ");

    let dim = Style::default().fg(Color::DarkGray);
    let lines = match client.log().get(index) {
        Some(entry) => {
            let detail = match view.image(index) {
                Some(ImageLoad::Loaded(inline)) => {
                    format!("{} · {}x{} px", inline.media_type, inline.width, inline.height)
                },
                Some(ImageLoad::Failed) => "failed to load".to_string(),
                None => "loading…".to_string(),
            };
            vec![
                Line::from(Span::styled(entry.header().unwrap_or_default(), dim)).centered(),
                Line::from(""),
                Line::from(detail).centered(),
                Line::from(Span::styled(format!("{} bytes encoded", entry.body.len()), dim))
                    .centered(),
                Line::from(""),
                Line::from(Span::styled("Esc to close", dim)).centered(),
            ]
        },
        None => vec![Line::from("no such image").centered()],
    };

    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// Center a percentage-sized rectangle inside `area`.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Option<Rect> {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let middle = *vertical.get(1)?;

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(middle);
    horizontal.get(1).copied()
}
