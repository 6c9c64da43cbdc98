//! Transport error types.

use thiserror::Error;

/// Errors from the bus transports.
///
/// Bus failures are deliberately opaque at this layer: whatever the
/// underlying peripheral reported, callers see the same single signal. Any
/// retry or recovery policy lives in the wire core above.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The link has not been opened.
    #[error("link not open")]
    NotOpen,

    /// The underlying bus transaction failed.
    #[error("bus transfer failed")]
    Bus,
}

/// Result type alias for transport operations.
pub type LinkResult<T> = Result<T, LinkError>;
