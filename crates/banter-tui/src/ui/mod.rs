//! UI rendering.
//!
//! Pure functions converting engine and view state into ratatui widgets.
//! No I/O and no mutation; the runtime decides when to draw.

mod chat;
mod compose;
mod join;
mod preview;
mod roster;
mod status;

use banter_client::Client;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    input::InputState,
    view::{Screen, ViewState},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, client: &Client, view: &ViewState, input: &InputState) {
    match view.screen() {
        Screen::Join => join::render(frame, view, input),
        Screen::Chat => render_chat(frame, client, view, input),
    }
}

/// Render the expanded chat layout.
fn render_chat(frame: &mut Frame, client: &Client, view: &ViewState, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const TYPING_HEIGHT: u16 = 1;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(TYPING_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, typing_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, client, view, *main_area);
    compose::render_typing(frame, client, *typing_area);
    compose::render(frame, client, input, *input_area);
    status::render(frame, client, view, *status_area);

    if view.preview().is_some() {
        preview::render(frame, client, view);
    }
}

/// Render the main area (message log, plus the roster panel when open).
fn render_main_area(frame: &mut Frame, client: &Client, view: &ViewState, area: Rect) {
    const CHAT_AREA_MIN_WIDTH: u16 = 20;
    const ROSTER_WIDTH: u16 = 26;

    if !view.roster_open() {
        chat::render(frame, client, view, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(CHAT_AREA_MIN_WIDTH), Constraint::Length(ROSTER_WIDTH)])
        .split(area);

    let [chat_area, roster_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, client, view, *chat_area);
    roster::render(frame, client, *roster_area);
}
