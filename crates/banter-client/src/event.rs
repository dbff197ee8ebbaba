//! Engine input events and output actions.
//!
//! Events originate from three sources: the transport (lifecycle signals and
//! server events), the frontend (user intents and completion notices), and
//! the clock (ticks). The engine never asks for the time itself; callers
//! supply an instant with every time-sensitive event so the machine stays
//! deterministic under test.

use std::time::Instant;

use banter_codec::{CodecError, ImageSource};
use banter_proto::{InboundEvent, OutboundEvent};

/// Events the caller feeds into the engine.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The channel came up (first connect or transport-owned reconnect).
    ChannelUp,

    /// The channel dropped.
    ChannelDown,

    /// A server event arrived on the channel.
    Server(InboundEvent),

    /// Periodic tick for deadline processing.
    ///
    /// The caller sends ticks frequently enough to honor the typing-stop
    /// and layout-expansion deadlines (100 ms in the terminal runtime).
    Tick {
        /// Current time.
        now: Instant,
    },

    /// User submitted the join form.
    SubmitJoin {
        /// Requested display name, trimmed by the session machine.
        username: String,
        /// Submission time, anchors the layout-expansion delay.
        now: Instant,
    },

    /// Non-submitting keystroke in the compose field.
    Keystroke {
        /// Keystroke time, anchors the typing-stop deadline.
        now: Instant,
    },

    /// User submitted the compose field.
    SubmitText {
        /// Raw compose buffer contents.
        body: String,
    },

    /// User selected a file to send as an image.
    AttachImage {
        /// The selected file.
        source: ImageSource,
    },

    /// Background image compression finished.
    ImageEncoded {
        /// Data-URL payload, or the failure to report.
        result: Result<String, CodecError>,
    },

    /// An inline image finished loading in the renderer, successfully or
    /// not. Drives the second phase of the scroll-to-latest guarantee.
    ImageLoadCompleted {
        /// Index of the settled entry in the message log.
        index: usize,
    },
}

/// Actions the engine produces for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Send an event over the channel.
    Emit(OutboundEvent),

    /// Redraw the UI.
    Render,

    /// Pin the message log view to its newest entry.
    ScrollToLatest,

    /// Compress an image off the event loop. The runtime must report
    /// completion back via [`ClientEvent::ImageEncoded`].
    StartImageEncode {
        /// The validated source to compress.
        source: ImageSource,
    },

    /// Switch the layout from the join screen to the chat screen.
    ExpandLayout,

    /// Show a user-visible notice in the status line.
    Alert {
        /// Notice text.
        message: String,
    },

    /// Clear the compose input after a successful text send.
    ClearCompose,
}
