//! Wire protocol for the banter chat system.
//!
//! The channel between client and server is a bidirectional, ordered stream
//! of named events, each carrying a JSON payload. This crate defines the
//! event names and payload types for both directions plus the text wire
//! encoding used by network transports.
//!
//! The synchronization engine consumes and produces typed events only;
//! encoding and decoding happen at the transport edge.

#![forbid(unsafe_code)]

pub mod errors;
pub mod events;
pub mod wire;

pub use errors::ProtocolError;
pub use events::{
    ChatMessage, InboundEvent, JoinRequest, MessageKind, OutboundEvent, PeerTyping, RosterUpdate,
    RosterUser, SendMessage, ServerNotice, SystemNotice, Typing, DEFAULT_ROOM,
};
