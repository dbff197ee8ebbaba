//! Protocol error types.
//!
//! Errors carry string reasons rather than the underlying serde error so
//! they stay `Clone` and `PartialEq` across crate boundaries.

use thiserror::Error;

/// Errors from wire encoding or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// An event could not be serialized to a wire frame.
    #[error("failed to encode wire frame: {reason}")]
    Encode {
        /// Serializer failure description.
        reason: String,
    },

    /// A wire frame could not be parsed as a known event.
    #[error("failed to decode wire frame: {reason}")]
    Decode {
        /// Deserializer failure description.
        reason: String,
    },
}
