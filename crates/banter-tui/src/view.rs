//! View-model state for the terminal frontend.
//!
//! Everything here is presentation state the engine deliberately does not
//! own: which screen is visible, panel and overlay visibility, scroll
//! pinning, and the decoded metadata of inline images. Pure data, mutated
//! only by the runtime in response to engine actions and key input.

use std::collections::HashMap;

use banter_codec::InlineImage;

/// Which top-level screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Username prompt, shown until the post-join layout expansion.
    #[default]
    Join,
    /// The chat layout.
    Chat,
}

/// Result of an inline image load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoad {
    /// Decoded successfully.
    Loaded(InlineImage),
    /// The payload could not be decoded; a placeholder stays visible.
    Failed,
}

/// Presentation state owned by the runtime.
#[derive(Debug, Default)]
pub struct ViewState {
    screen: Screen,
    roster_open: bool,
    /// Log index of the entry shown in the preview overlay.
    preview: Option<usize>,
    /// Status-line notice; replaced by the next notice.
    alert: Option<String>,
    /// Whether the log view sticks to the newest entry.
    pinned: bool,
    /// Lines scrolled up from the bottom while unpinned.
    scroll_back: usize,
    /// Inline image load results by log index.
    images: HashMap<usize, ImageLoad>,
}

impl ViewState {
    /// Create the initial view: join screen, log pinned to the latest entry.
    pub fn new() -> Self {
        Self { pinned: true, ..Self::default() }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Switch to the chat layout (the post-join expansion).
    pub fn expand(&mut self) {
        self.screen = Screen::Chat;
    }

    /// Whether the roster panel is open.
    pub fn roster_open(&self) -> bool {
        self.roster_open
    }

    /// Toggle the roster panel.
    pub fn toggle_roster(&mut self) {
        self.roster_open = !self.roster_open;
    }

    /// Log index shown in the preview overlay, if open.
    pub fn preview(&self) -> Option<usize> {
        self.preview
    }

    /// Open the preview overlay for a log entry.
    pub fn open_preview(&mut self, index: usize) {
        self.preview = Some(index);
    }

    /// Close the preview overlay.
    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Current status-line notice.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Show a status-line notice, replacing any prior one.
    pub fn set_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    /// Whether the log view sticks to the newest entry.
    pub fn pinned(&self) -> bool {
        self.pinned
    }

    /// Lines scrolled up from the bottom while unpinned.
    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Pin the log view to the newest entry.
    pub fn pin_to_latest(&mut self) {
        self.pinned = true;
        self.scroll_back = 0;
    }

    /// Scroll one line towards older entries, unpinning the view.
    pub fn scroll_up(&mut self) {
        self.pinned = false;
        // Clamped against the actual line count at render time.
        self.scroll_back = self.scroll_back.saturating_add(1);
    }

    /// Scroll one line towards newer entries, re-pinning at the bottom.
    pub fn scroll_down(&mut self) {
        if self.scroll_back <= 1 {
            self.pin_to_latest();
        } else {
            self.scroll_back -= 1;
        }
    }

    /// Record an inline image load result.
    pub fn record_image(&mut self, index: usize, load: ImageLoad) {
        self.images.insert(index, load);
    }

    /// Inline image load result for a log entry, if settled.
    pub fn image(&self, index: usize) -> Option<&ImageLoad> {
        self.images.get(&index)
    }
}
