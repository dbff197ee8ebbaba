//! Message log area.
//!
//! Renders the append-only log with its three visual roles: system notices
//! centered and dim, own messages right-aligned under a "you" header, other
//! messages left-aligned under the sender's header. Image bodies render as
//! bounded placeholders whose dimensions appear once the inline decode
//! settles.

use banter_client::{Classification, Client, EntryKind};
use banter_proto::DEFAULT_ROOM;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::view::{ImageLoad, ViewState};

const BORDER_SIZE: u16 = 2;

/// Render the message log.
pub fn render(frame: &mut Frame, client: &Client, view: &ViewState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" #{DEFAULT_ROOM} "));

    let mut lines: Vec<Line> = Vec::new();
    for (index, entry) in client.log().entries().iter().enumerate() {
        match entry.class {
            Classification::System => {
                lines.push(
                    Line::from(Span::styled(
                        entry.body.clone(),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    ))
                    .centered(),
                );
            },
            Classification::Own | Classification::Other => {
                let align_right = entry.class == Classification::Own;
                if let Some(header) = entry.header() {
                    let header_line =
                        Line::from(Span::styled(header, Style::default().fg(Color::DarkGray)));
                    lines.push(if align_right { header_line.right_aligned() } else { header_line });
                }
                if entry.kind == EntryKind::Image {
                    let placeholder = Line::from(Span::styled(
                        image_placeholder(view, index),
                        Style::default().fg(Color::Cyan),
                    ));
                    lines.push(if align_right { placeholder.right_aligned() } else { placeholder });
                } else {
                    for body_line in entry.body.lines() {
                        let line = Line::from(body_line.to_string());
                        lines.push(if align_right { line.right_aligned() } else { line });
                    }
                }
            },
        }
    }

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let max_skip = lines.len().saturating_sub(visible_height);
    let skip =
        if view.pinned() { max_skip } else { max_skip.saturating_sub(view.scroll_back()) };
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}

/// Placeholder text for an inline image, bounded regardless of the actual
/// pixel size.
fn image_placeholder(view: &ViewState, index: usize) -> String {
    match view.image(index) {
        Some(ImageLoad::Loaded(inline)) => format!("[image {}x{}]", inline.width, inline.height),
        Some(ImageLoad::Failed) => "[image failed to load]".to_string(),
        None => "[image loading…]".to_string(),
    }
}
