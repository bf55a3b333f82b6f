//! Error types for the virtual transceiver

use thiserror::Error;

use crate::CallKind;

/// Errors reported by [`crate::VirtualTransceiver`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A failure armed with [`crate::VirtualTransceiver::fail_on`]
    #[error("injected failure on {0:?}")]
    Injected(CallKind),
}
