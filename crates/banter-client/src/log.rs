//! Append-only message log with visual classification.
//!
//! Every received message is classified into one of three mutually
//! exclusive roles — own, other, or system — at append time, and never
//! mutated afterwards. Ordering is arrival order; the transport's in-order
//! delivery is the only ordering guarantee, and the log adds none of its
//! own (no reordering, no de-duplication, no timestamp reconciliation).
//! The log grows without bound; no eviction exists in this design.

use banter_proto::{ChatMessage, MessageKind, SystemNotice};

/// Display identity used in headers of the local user's own messages.
pub const SELF_MARKER: &str = "you";

/// Visual role of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Sent by the local user (sender matches the session username).
    Own,
    /// Sent by another user.
    Other,
    /// Server-generated join/leave notice; no sender comparison applies.
    System,
}

/// Body kind of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Plain text body.
    Text,
    /// Data-URL image body.
    Image,
    /// System notice text.
    System,
}

impl From<MessageKind> for EntryKind {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Text => Self::Text,
            MessageKind::Image => Self::Image,
        }
    }
}

/// One immutable entry in the visible log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Sender's display name (the noticed user for system entries).
    pub sender: String,
    /// Body kind.
    pub kind: EntryKind,
    /// Body: text, data-URL image encoding, or notice text.
    pub body: String,
    /// Server-supplied display time.
    pub time: String,
    /// Visual role.
    pub class: Classification,
}

impl LogEntry {
    /// Header line for the entry: `"<display-identity> <time>"`.
    ///
    /// Own messages show [`SELF_MARKER`] instead of the sender name.
    /// System notices render without a header.
    pub fn header(&self) -> Option<String> {
        match self.class {
            Classification::System => None,
            Classification::Own => Some(format!("{SELF_MARKER} {}", self.time)),
            Classification::Other => Some(format!("{} {}", self.sender, self.time)),
        }
    }
}

/// The append-only message log.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chat message, classifying it against the local username.
    ///
    /// Returns the index of the new entry.
    pub fn push_chat(&mut self, message: ChatMessage, local_username: Option<&str>) -> usize {
        let class = if local_username == Some(message.username.as_str()) {
            Classification::Own
        } else {
            Classification::Other
        };
        self.entries.push(LogEntry {
            sender: message.username,
            kind: message.kind.into(),
            body: message.message,
            time: message.time,
            class,
        });
        self.entries.len() - 1
    }

    /// Append a system notice. Returns the index of the new entry.
    pub fn push_system(&mut self, notice: SystemNotice) -> usize {
        self.entries.push(LogEntry {
            sender: notice.username,
            kind: EntryKind::System,
            body: notice.message,
            time: notice.time,
            class: Classification::System,
        });
        self.entries.len() - 1
    }

    /// All entries, in arrival order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entry at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
