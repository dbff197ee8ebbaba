//! Compose-field command parsing.
//!
//! Anything starting with `/` is a command; everything else is a chat
//! message. Commands cover what a pointer-driven UI would expose as
//! buttons: image upload, image preview, the roster panel.

use std::path::Path;

/// A parsed compose-field submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain chat message.
    Message {
        /// Raw message text.
        content: String,
    },
    /// Rejoin the room, optionally under a (new) username.
    Join {
        /// Username argument; absent means reuse the session identity.
        username: Option<String>,
    },
    /// Send an image file.
    Image {
        /// Path to the file.
        path: String,
    },
    /// Open the full-size preview of a rendered image.
    Preview {
        /// 1-based index among image messages; absent means the newest.
        index: Option<usize>,
    },
    /// Toggle the roster panel.
    Users,
    /// Quit the application.
    Quit,
    /// Unrecognized command.
    Unknown {
        /// The offending input.
        input: String,
    },
    /// Recognized command with bad arguments.
    InvalidArgs {
        /// The command name.
        command: &'static str,
        /// What went wrong.
        error: &'static str,
    },
}

/// Parse a compose-field submission.
pub fn parse(text: &str) -> Command {
    let Some(rest) = text.strip_prefix('/') else {
        return Command::Message { content: text.to_string() };
    };

    let mut parts = rest.split_whitespace();
    let command = parts.next().unwrap_or("");

    match command {
        "join" => Command::Join { username: parts.next().map(str::to_string) },
        "image" => match parts.next() {
            // Paths may contain spaces; take the remainder verbatim.
            Some(_) => {
                let path = rest["image".len()..].trim().to_string();
                Command::Image { path }
            },
            None => Command::InvalidArgs { command: "image", error: "usage: /image <path>" },
        },
        "preview" => match parts.next() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(index) if index >= 1 => Command::Preview { index: Some(index) },
                _ => Command::InvalidArgs { command: "preview", error: "usage: /preview [n]" },
            },
            None => Command::Preview { index: None },
        },
        "users" => Command::Users,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown { input: text.to_string() },
    }
}

/// Guess a media type from a file extension, standing in for the browser's
/// `file.type`. Unknown extensions map to a non-image type and get rejected
/// by the codec precheck.
pub fn media_type_for_path(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
