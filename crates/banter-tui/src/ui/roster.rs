//! Online users panel.
//!
//! Shows the server-authoritative roster: avatar initial, username, a
//! "(you)" marker on the local entry, and an online status label. The
//! header count is the server's integer verbatim.

use banter_client::Client;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the roster panel.
pub fn render(frame: &mut Frame, client: &Client, area: Rect) {
    let block =
        Block::default().borders(Borders::ALL).title(format!(" online ({}) ", client.roster().count()));

    let local = client.session().username();
    let items: Vec<ListItem> = if client.roster().users().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "nobody here yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        client
            .roster()
            .users()
            .iter()
            .map(|user| {
                let initial = user
                    .username
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().next().unwrap_or(c))
                    .unwrap_or('?');
                let mut spans = vec![
                    Span::styled(
                        format!("{initial} "),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(user.username.clone()),
                ];
                if local == Some(user.username.as_str()) {
                    spans.push(Span::styled(" (you)", Style::default().fg(Color::Yellow)));
                }
                spans.push(Span::styled("  online", Style::default().fg(Color::DarkGray)));
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}
