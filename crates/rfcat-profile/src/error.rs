//! Error types for profile loading and command transmission

use thiserror::Error;

/// Errors that can occur while building a manufacturer profile
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Modulation name not present in the modulation table
    #[error("unknown modulation scheme '{0}'")]
    UnknownModulation(String),

    /// Command code contains a character that does not fit in one byte
    #[error("command '{command}': character {ch:?} at position {position} is outside 0x00-0xFF")]
    CodeOutOfRange {
        /// Name of the offending command
        command: String,
        /// Character index within the code string
        position: usize,
        /// The rejected character
        ch: char,
    },

    /// Profile document is malformed or has wrongly typed values
    #[error("invalid profile document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while transmitting a named command
#[derive(Debug, Error)]
pub enum TxError<E> {
    /// No command with this name exists in the profile
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The radio driver reported a failure
    #[error("device error: {0}")]
    Device(#[source] E),
}
