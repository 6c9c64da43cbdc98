//! Protocol error types.

use thiserror::Error;

use crate::types::Program;

/// Errors that can occur when talking to the camera.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The device reported a failure status.
    #[error("device status: {0}")]
    Device(StatusCode),

    /// A forced program switch failed; the query it guarded was not issued.
    #[error("switch to program {0} failed")]
    ProgramSwitch(Program),

    /// Turn angle outside (-180, 180].
    #[error("turn angle {0} out of range (-180, 180]")]
    AngleOutOfRange(i16),
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Status codes reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// Generic failure.
    Error,
    /// The device is busy with the current frame.
    Busy,
    /// Response checksum did not match its payload.
    ChecksumError,
    /// No response within the wire core's deadline.
    Timeout,
    /// The user button is overriding host control.
    ButtonOverride,
    /// A program change is still in progress.
    ProgramChanging,
    /// Unrecognized status code.
    Unknown(i8),
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Error => write!(f, "error"),
            StatusCode::Busy => write!(f, "busy"),
            StatusCode::ChecksumError => write!(f, "checksum error"),
            StatusCode::Timeout => write!(f, "timeout"),
            StatusCode::ButtonOverride => write!(f, "button override"),
            StatusCode::ProgramChanging => write!(f, "program changing"),
            StatusCode::Unknown(code) => write!(f, "unknown status ({})", code),
        }
    }
}

impl From<i8> for StatusCode {
    fn from(code: i8) -> Self {
        use crate::constants::*;
        match code {
            STATUS_ERROR => StatusCode::Error,
            STATUS_BUSY => StatusCode::Busy,
            STATUS_CHECKSUM_ERROR => StatusCode::ChecksumError,
            STATUS_TIMEOUT => StatusCode::Timeout,
            STATUS_BUTTON_OVERRIDE => StatusCode::ButtonOverride,
            STATUS_PROG_CHANGING => StatusCode::ProgramChanging,
            _ => StatusCode::Unknown(code),
        }
    }
}

impl From<StatusCode> for i8 {
    fn from(code: StatusCode) -> Self {
        use crate::constants::*;
        match code {
            StatusCode::Error => STATUS_ERROR,
            StatusCode::Busy => STATUS_BUSY,
            StatusCode::ChecksumError => STATUS_CHECKSUM_ERROR,
            StatusCode::Timeout => STATUS_TIMEOUT,
            StatusCode::ButtonOverride => STATUS_BUTTON_OVERRIDE,
            StatusCode::ProgramChanging => STATUS_PROG_CHANGING,
            StatusCode::Unknown(code) => code,
        }
    }
}
