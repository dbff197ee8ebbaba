//! Event names and payload types.
//!
//! Outbound events flow client → server, inbound events server → client.
//! Field names and event names are part of the wire contract and must not
//! change without a protocol revision.

use serde::{Deserialize, Serialize};

/// The single shared room every client joins.
///
/// No multi-room routing exists; the field is carried on the wire so a later
/// revision can introduce it without changing the join payload shape.
pub const DEFAULT_ROOM: &str = "general";

/// Kind of a chat message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain UTF-8 text.
    Text,
    /// A data-URL encoded image (see `banter-codec`).
    Image,
}

/// Events emitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Join the shared room under a self-asserted username.
    Join(JoinRequest),
    /// Send a chat message to the room.
    SendMessage(SendMessage),
    /// Report local typing activity.
    Typing(Typing),
}

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A user joined the room (system notice).
    UserJoined(SystemNotice),
    /// A user left the room (system notice).
    UserLeft(SystemNotice),
    /// Authoritative roster snapshot. Replaces all prior presence state.
    OnlineUsersUpdate(RosterUpdate),
    /// A chat message broadcast to the room. The sender receives its own
    /// messages through this event like everyone else.
    ReceiveMessage(ChatMessage),
    /// A peer started or stopped typing.
    UserTyping(PeerTyping),
    /// Server-signaled error, surfaced to the user verbatim.
    Error(ServerNotice),
}

/// Payload of the `join` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Self-asserted display name. Non-empty after trimming; not validated
    /// beyond that.
    pub username: String,
    /// Room to join. Always [`DEFAULT_ROOM`] in this revision.
    pub room: String,
}

impl JoinRequest {
    /// Build a join request for the default room.
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), room: DEFAULT_ROOM.to_string() }
    }
}

/// Payload of the `send_message` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    /// Message body: plain text, or a data-URL image encoding.
    pub message: String,
    /// Body kind.
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// Payload of the `typing` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typing {
    /// `true` on keystroke activity, `false` once the debounce window
    /// elapses.
    pub is_typing: bool,
}

/// Payload of the `user_joined` / `user_left` system notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotice {
    /// User the notice is about.
    pub username: String,
    /// Server-rendered notice text, displayed as-is.
    pub message: String,
    /// Server-rendered display time (`%H:%M:%S`).
    pub time: String,
}

/// Payload of the `online_users_update` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterUpdate {
    /// Present users, in server order.
    pub users: Vec<RosterUser>,
    /// Presence count as computed by the server. Displayed verbatim, never
    /// recomputed from `users.len()`.
    pub count: usize,
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterUser {
    /// Display name.
    pub username: String,
    /// Opaque per-session identifier assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Payload of the `receive_message` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender's display name.
    pub username: String,
    /// Message body: plain text or a data-URL image encoding.
    pub message: String,
    /// Body kind.
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Server-rendered display time (`%H:%M:%S`). The client never
    /// generates or reconciles timestamps.
    pub time: String,
    /// Opaque per-session identifier of the sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Payload of the `user_typing` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerTyping {
    /// The typing peer. Never the local user; the server excludes the
    /// sender from typing broadcasts.
    pub username: String,
    /// Whether the peer is currently typing.
    pub is_typing: bool,
}

/// Payload of the `error` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerNotice {
    /// Human-readable error text.
    pub message: String,
}
