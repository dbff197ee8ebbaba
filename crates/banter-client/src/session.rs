//! Session lifecycle state machine.
//!
//! States progress `Disconnected → Connected → Joined`, with a drop back to
//! `Disconnected` possible from anywhere. The transport owns reconnection;
//! a reconnect returns the session to `Connected` but never to `Joined` —
//! the user must rejoin.

use std::time::{Duration, Instant};

use crate::error::SessionError;

/// Delay between a successful join and the layout expansion, decoupling the
/// UI transition from the logical join. The join request is emitted
/// immediately, independent of this deadline.
pub const EXPAND_DELAY: Duration = Duration::from_millis(300);

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No channel to the server.
    Disconnected,
    /// Channel established, room not joined.
    Connected,
    /// Channel established and the room joined.
    Joined,
}

/// The local session: lifecycle state plus the self-asserted identity.
#[derive(Debug, Clone)]
pub struct Session {
    state: ConnectionState,
    username: Option<String>,
    /// Single-slot deadline for the post-join layout expansion.
    expand_at: Option<Instant>,
}

impl Session {
    /// Create a new disconnected session.
    pub fn new() -> Self {
        Self { state: ConnectionState::Disconnected, username: None, expand_at: None }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The joined username. `None` before the first successful join.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether the session is in the `Joined` state.
    pub fn is_joined(&self) -> bool {
        self.state == ConnectionState::Joined
    }

    /// Channel came up. `Disconnected → Connected`; no-op otherwise.
    ///
    /// Returns whether the state changed.
    pub fn channel_up(&mut self) -> bool {
        if self.state == ConnectionState::Disconnected {
            self.state = ConnectionState::Connected;
            return true;
        }
        false
    }

    /// Channel dropped. Any state → `Disconnected`.
    ///
    /// The username is kept; identity survives an outage even though the
    /// room membership does not. Returns whether the state changed.
    pub fn channel_down(&mut self) -> bool {
        if self.state == ConnectionState::Disconnected {
            return false;
        }
        self.state = ConnectionState::Disconnected;
        true
    }

    /// Join the room under `username`.
    ///
    /// The name is trimmed; an empty result is a validation failure and
    /// leaves the session untouched. On success the session is `Joined`,
    /// the name is recorded, and the layout-expansion deadline is armed.
    /// Callers treat repeat joins while already `Joined` as no-ops.
    pub fn join(&mut self, username: &str, now: Instant) -> Result<String, SessionError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        self.username = Some(trimmed.to_string());
        self.state = ConnectionState::Joined;
        self.expand_at = Some(now + EXPAND_DELAY);
        Ok(trimmed.to_string())
    }

    /// Poll the layout-expansion deadline. Returns `true` exactly once,
    /// when the deadline has elapsed.
    pub fn poll_expand(&mut self, now: Instant) -> bool {
        match self.expand_at {
            Some(at) if at <= now => {
                self.expand_at = None;
                true
            },
            _ => false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_follows_channel_signals() {
        let mut session = Session::new();
        assert_eq!(session.state(), ConnectionState::Disconnected);

        assert!(session.channel_up());
        assert_eq!(session.state(), ConnectionState::Connected);

        // Duplicate signal is a no-op.
        assert!(!session.channel_up());

        assert!(session.channel_down());
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(!session.channel_down());
    }

    #[test]
    fn join_trims_and_records_username() {
        let mut session = Session::new();
        session.channel_up();

        let name = session.join("  alice  ", Instant::now());
        assert_eq!(name.ok().as_deref(), Some("alice"));
        assert_eq!(session.username(), Some("alice"));
        assert!(session.is_joined());
    }

    #[test]
    fn empty_username_is_rejected_without_state_change() {
        let mut session = Session::new();
        session.channel_up();

        assert_eq!(session.join("   ", Instant::now()), Err(SessionError::EmptyUsername));
        assert_eq!(session.state(), ConnectionState::Connected);
        assert_eq!(session.username(), None);
    }

    #[test]
    fn join_works_from_disconnected() {
        // Join is not gated on the channel; the emit simply goes nowhere
        // until the transport is up.
        let mut session = Session::new();
        assert!(session.join("bob", Instant::now()).is_ok());
        assert!(session.is_joined());
    }

    #[test]
    fn reconnect_does_not_restore_joined() {
        let mut session = Session::new();
        session.channel_up();
        session.join("alice", Instant::now()).ok();

        session.channel_down();
        assert!(session.channel_up());
        assert_eq!(session.state(), ConnectionState::Connected);
        // Identity survives the outage.
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn expansion_fires_once_after_the_delay() {
        let mut session = Session::new();
        let t0 = Instant::now();
        session.join("alice", t0).ok();

        assert!(!session.poll_expand(t0));
        assert!(!session.poll_expand(t0 + EXPAND_DELAY / 2));
        assert!(session.poll_expand(t0 + EXPAND_DELAY));
        assert!(!session.poll_expand(t0 + EXPAND_DELAY * 2));
    }

    #[test]
    fn expansion_survives_a_channel_drop() {
        // The layout switch is fire-and-forget; a drop during the animation
        // window does not cancel it.
        let mut session = Session::new();
        let t0 = Instant::now();
        session.join("alice", t0).ok();
        session.channel_down();

        assert!(session.poll_expand(t0 + EXPAND_DELAY * 2));
    }
}
