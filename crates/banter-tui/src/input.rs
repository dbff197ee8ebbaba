//! Input state and key abstraction for the TUI.
//!
//! [`InputState`] owns the text buffer and cursor shared by the join screen
//! and the compose field. [`KeyInput`] decouples the rest of the frontend
//! from crossterm key types.

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter without the line-break modifier: submit.
    Enter,
    /// Enter with the line-break modifier: insert a newline.
    NewLine,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
    /// Tab key (toggle the roster panel).
    Tab,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow (scroll the log).
    Up,
    /// Down arrow (scroll the log).
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Text input buffer with cursor.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    /// Cursor position as a byte offset; always on a char boundary.
    cursor: usize,
}

impl InputState {
    /// Create an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters (for rendering).
    pub fn cursor_chars(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Clear the buffer and reset the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns `true` if the key was an editing key.
    pub fn apply_edit(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.buffer.remove(prev);
                    self.cursor = prev;
                }
                true
            },
            KeyInput::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
                true
            },
            KeyInput::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                true
            },
            KeyInput::Right => {
                if let Some(c) = self.buffer[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
                true
            },
            KeyInput::Home => {
                self.cursor = 0;
                true
            },
            KeyInput::End => {
                self.cursor = self.buffer.len();
                true
            },
            _ => false,
        }
    }

    /// Byte offset of the char boundary before the cursor, if any.
    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }
}
