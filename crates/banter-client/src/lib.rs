//! Client-side synchronization engine for banter.
//!
//! The [`Client`] is a pure state machine: it consumes [`ClientEvent`]
//! inputs (user intents, inbound server events, transport lifecycle signals,
//! time ticks, asynchronous completions) and produces [`ClientAction`]
//! instructions for the runtime to execute. No I/O, no timers, no UI tree —
//! fully testable by feeding event sequences and inspecting actions.
//!
//! # Components
//!
//! - [`Session`]: connection/join lifecycle state machine
//! - [`MessageLog`]: append-only message pipeline with visual classification
//! - [`Roster`]: server-authoritative presence snapshot
//! - [`TypingNotifier`]: keystroke debounce with a single-slot stop deadline
//! - [`Client`]: the event router binding the above together

#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod event;
pub mod log;
pub mod presence;
pub mod session;
pub mod typing;

pub use client::Client;
pub use error::SessionError;
pub use event::{ClientAction, ClientEvent};
pub use log::{Classification, EntryKind, LogEntry, MessageLog, SELF_MARKER};
pub use presence::Roster;
pub use session::{ConnectionState, Session, EXPAND_DELAY};
pub use typing::{TypingNotifier, TYPING_STOP_DELAY};
