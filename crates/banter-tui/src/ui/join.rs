//! Join screen.
//!
//! The username prompt shown until the post-join layout expansion switches
//! to the chat screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{input::InputState, view::ViewState};

const BOX_WIDTH: u16 = 44;
const BOX_HEIGHT: u16 = 7;
const PROMPT_WIDTH: u16 = 3; // border + "> "

/// Render the join screen.
pub fn render(frame: &mut Frame, view: &ViewState, input: &InputState) {
    let Some(box_area) = centered_box(frame.area()) else {
        return;
    };

    let notice = view.alert().unwrap_or_default().to_string();
    let lines = vec![
        Line::from("choose a username"),
        Line::from(""),
        Line::from(format!("> {}", input.buffer())),
        Line::from(""),
        Line::from(Span::styled(notice, Style::default().fg(Color::Yellow))),
    ];

    let block = Block::default().borders(Borders::ALL).title(" banter ");
    frame.render_widget(Paragraph::new(lines).block(block), box_area);

    let cursor_x = box_area
        .x
        .saturating_add(PROMPT_WIDTH)
        .saturating_add(input.cursor_chars() as u16)
        .min(box_area.x.saturating_add(box_area.width.saturating_sub(2)));
    let cursor_y = box_area.y.saturating_add(3);
    frame.set_cursor_position((cursor_x, cursor_y));
}

/// Center the prompt box in the terminal.
fn centered_box(area: Rect) -> Option<Rect> {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(BOX_HEIGHT), Constraint::Min(0)])
        .split(area);
    let middle = *vertical.get(1)?;

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(BOX_WIDTH), Constraint::Min(0)])
        .split(middle);
    horizontal.get(1).copied()
}
