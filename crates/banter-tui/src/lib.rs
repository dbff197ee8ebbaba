//! Terminal UI for banter.
//!
//! A thin shell over the [`banter_client`] engine: crossterm supplies input,
//! ratatui renders engine state, and a tokio event loop in [`runtime`] wires
//! them to a channel transport — either the in-process simulated server or a
//! WebSocket connection.

#![forbid(unsafe_code)]

pub mod commands;
pub mod input;
pub mod runtime;
pub mod server;
pub mod transport;
pub mod ui;
pub mod view;

pub use input::{InputState, KeyInput};
pub use runtime::{Runtime, RuntimeError};
pub use view::{ImageLoad, Screen, ViewState};
