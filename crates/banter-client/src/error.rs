//! Engine error types.

use thiserror::Error;

/// Errors from session lifecycle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Join was attempted with a username that is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,
}
