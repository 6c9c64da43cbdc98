//! The wire-core seam.
//!
//! Request framing, response parsing, payload checksum validation, and any
//! retry or timeout policy live in a wire core outside this crate — the
//! session only needs its typed surface. Integrations implement
//! [`ProtocolCore`] over a bus transport and hand it to
//! [`ProtocolSession`](crate::ProtocolSession).

use crate::error::ProtocolResult;
use crate::types::{Block, LineFeatures, Program, Resolution, RgbSample, VersionInfo};

/// Typed request/response surface of the wire core.
///
/// Every method issues one request and blocks until its response, bounded by
/// whatever timeout the core implements. Methods taking a `wait` flag block
/// for fresh frame data when `wait` is true; with `wait` false they return
/// immediately, yielding `Ok(None)` when no new frame is available yet —
/// which callers must treat as "not yet available", not as a failure.
pub trait ProtocolCore {
    /// Open the underlying transport. Called once, lazily, by the session.
    fn open(&mut self) -> ProtocolResult<()>;

    /// Release the underlying transport.
    fn close(&mut self);

    /// Query hardware and firmware version.
    fn version(&mut self) -> ProtocolResult<VersionInfo>;

    /// Switch the camera to `program` and report its frame resolution.
    ///
    /// A reported zero-by-zero resolution means the switch did not complete.
    fn change_program(&mut self, program: Program) -> ProtocolResult<Resolution>;

    /// Query the active program's frame resolution.
    fn resolution(&mut self) -> ProtocolResult<Resolution>;

    /// Query the current frame rate in frames per second.
    fn frame_rate(&mut self) -> ProtocolResult<u8>;

    /// Set both RC servo outputs.
    fn set_servos(&mut self, s0: u16, s1: u16) -> ProtocolResult<()>;

    /// Set the relative exposure level.
    fn set_camera_brightness(&mut self, brightness: u8) -> ProtocolResult<()>;

    /// Set the RGB LED.
    fn set_led(&mut self, r: u8, g: u8, b: u8) -> ProtocolResult<()>;

    /// Switch the upper white LEDs and the lower lamp on or off.
    fn set_lamp(&mut self, upper: bool, lower: bool) -> ProtocolResult<()>;

    /// Fetch detected color blocks, largest area first.
    fn blocks(
        &mut self,
        wait: bool,
        sigmap: u8,
        max_blocks: u8,
    ) -> ProtocolResult<Option<Vec<Block>>>;

    /// Fetch the tracked line, connected intersections, and new barcodes.
    fn main_features(&mut self, features: u8, wait: bool)
        -> ProtocolResult<Option<LineFeatures>>;

    /// Fetch every detected line feature.
    fn all_features(&mut self, features: u8, wait: bool)
        -> ProtocolResult<Option<LineFeatures>>;

    /// Set line-tracking mode bits.
    fn set_line_mode(&mut self, mode: u8) -> ProtocolResult<()>;

    /// Set the turn angle for the next intersection only.
    fn set_next_turn(&mut self, angle: i16) -> ProtocolResult<()>;

    /// Set the default turn angle for subsequent intersections.
    fn set_default_turn(&mut self, angle: i16) -> ProtocolResult<()>;

    /// Select the tracked vector by candidate index (manual selection mode).
    fn set_vector(&mut self, index: u8) -> ProtocolResult<()>;

    /// Reverse the tracked vector's direction.
    fn reverse_vector(&mut self) -> ProtocolResult<()>;

    /// Sample a 5x5 neighborhood centered at (x, y), averaged to one triple.
    fn rgb(&mut self, x: u16, y: u16, saturate: bool) -> ProtocolResult<RgbSample>;
}
