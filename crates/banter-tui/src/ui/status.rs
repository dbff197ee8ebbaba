//! Status bar.
//!
//! Connection state, presence count, and the current status-line notice.

use banter_client::{Client, ConnectionState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::view::ViewState;

/// Render the status bar.
pub fn render(frame: &mut Frame, client: &Client, view: &ViewState, area: Rect) {
    let connection = match client.session().state() {
        ConnectionState::Disconnected => {
            Span::styled("disconnected", Style::default().fg(Color::Red))
        },
        ConnectionState::Connected => Span::styled("connected", Style::default().fg(Color::Yellow)),
        ConnectionState::Joined => Span::styled(
            format!("joined as {}", client.session().username().unwrap_or("?")),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let presence = format!(" | online: {}", client.roster().count());
    let notice = view.alert().map(|m| format!(" | {m}")).unwrap_or_default();

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection,
        Span::styled(presence, Style::default().fg(Color::DarkGray)),
        Span::styled(notice, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}
