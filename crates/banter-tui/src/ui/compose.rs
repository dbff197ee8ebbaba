//! Compose field and typing indicator.

use banter_client::Client;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::InputState;

const PROMPT_WIDTH: u16 = 3; // "> " inside the border
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the shared typing indicator line.
///
/// One peer at most: the last `user_typing` event wins.
pub fn render_typing(frame: &mut Frame, client: &Client, area: Rect) {
    let text = client
        .peer_typing()
        .map(|name| format!(" {name} is typing…"))
        .unwrap_or_default();

    let line = Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the compose input with the image-send affordance.
pub fn render(frame: &mut Frame, client: &Client, input: &InputState, area: Rect) {
    // The affordance dims while an encode is in flight — the terminal
    // analog of the zero-opacity, non-interactive button.
    let affordance = if client.image_busy() {
        Span::styled(" encoding… ", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(" /image <path> ", Style::default().fg(Color::Cyan))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title_top(Line::from(affordance).right_aligned());

    // Newlines from Alt+Enter collapse to a marker in the single-line view.
    let shown = input.buffer().replace('\n', "⏎");
    let paragraph =
        Paragraph::new(format!("> {shown}")).style(Style::default().fg(Color::White)).block(block);
    frame.render_widget(paragraph, area);

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (input.cursor_chars() as u16).min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
