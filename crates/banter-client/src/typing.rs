//! Typing-indicator debounce.
//!
//! Every non-submitting keystroke emits a start notification immediately
//! (at-least-once, not edge-triggered) and re-arms a single stop deadline.
//! The deadline slot holds at most one pending fire; arming always replaces
//! any prior deadline, so the eventual stop is timed from the last
//! keystroke, never the first.

use std::time::{Duration, Instant};

/// Quiet interval after the last keystroke before the stop notification.
pub const TYPING_STOP_DELAY: Duration = Duration::from_millis(1000);

/// Single-slot cancellable stop timer for local typing activity.
#[derive(Debug, Clone, Default)]
pub struct TypingNotifier {
    stop_at: Option<Instant>,
}

impl TypingNotifier {
    /// Create an idle notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record keystroke activity, replacing any pending stop deadline.
    pub fn keystroke(&mut self, now: Instant) {
        self.stop_at = Some(now + TYPING_STOP_DELAY);
    }

    /// Whether a stop notification is scheduled.
    pub fn is_armed(&self) -> bool {
        self.stop_at.is_some()
    }

    /// Poll the deadline. Returns `true` exactly once, when the quiet
    /// interval has elapsed; the caller emits the stop notification.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.stop_at {
            Some(at) if at <= now => {
                self.stop_at = None;
                true
            },
            _ => false,
        }
    }
}
