//! Program-aware query session.
//!
//! A [`ProtocolSession`] owns a wire core and enforces the camera's
//! one-active-program rule. Program-independent operations (version, servos,
//! LED, lamp, exposure) are available directly on the session.
//! Program-bound operations hang off program handles — [`ColorProgram`],
//! [`LineProgram`], [`VideoProgram`] — so which program a query needs is
//! visible in the call signature instead of being a hidden side effect.
//!
//! Acquiring a handle always issues the program switch, even when the
//! requested program is already active, and always re-queries the frame
//! resolution; there is no "already active" short-circuit. Interleaving
//! handle acquisitions across families therefore switches the camera back
//! and forth each time — the cost is visible, not corrected.

use log::{debug, trace, warn};

use crate::constants::TURN_ANGLE_MAX;
use crate::error::{ProtocolError, ProtocolResult};
use crate::types::{Block, LineFeatures, Program, Resolution, RgbSample, VersionInfo};
use crate::wire::ProtocolCore;

// ============================================================================
// Session State
// ============================================================================

/// Which program the camera is running, as far as the session knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// No switch has succeeded yet, or the last attempt failed.
    Uninitialized,
    /// The program is active with the given frame resolution.
    Active {
        program: Program,
        resolution: Resolution,
    },
}

// ============================================================================
// Session
// ============================================================================

/// A synchronous session with the camera.
///
/// The session owns its wire core (and through it the bus link) exclusively;
/// at most one operation is in flight at a time. The core is opened lazily
/// on the first operation and closed when the session is dropped.
pub struct ProtocolSession<C: ProtocolCore> {
    core: C,
    state: SessionState,
    opened: bool,
}

impl<C: ProtocolCore> ProtocolSession<C> {
    /// Create a session over `core`. Nothing touches the bus until the
    /// first operation.
    pub fn new(core: C) -> Self {
        ProtocolSession {
            core,
            state: SessionState::Uninitialized,
            opened: false,
        }
    }

    /// The program currently active, if any switch has succeeded.
    pub fn active_program(&self) -> Option<Program> {
        match self.state {
            SessionState::Active { program, .. } => Some(program),
            SessionState::Uninitialized => None,
        }
    }

    /// Cached frame resolution of the active program.
    ///
    /// Only valid for the currently active program; cleared when a switch
    /// fails.
    pub fn cached_resolution(&self) -> Option<Resolution> {
        match self.state {
            SessionState::Active { resolution, .. } => Some(resolution),
            SessionState::Uninitialized => None,
        }
    }

    fn ensure_open(&mut self) -> ProtocolResult<()> {
        if !self.opened {
            trace!("opening wire core");
            self.core.open()?;
            self.opened = true;
        }
        Ok(())
    }

    // ========================================================================
    // Program-Independent Operations
    // ========================================================================

    /// Query hardware and firmware version.
    pub fn version(&mut self) -> ProtocolResult<VersionInfo> {
        self.ensure_open()?;
        self.core.version()
    }

    /// Re-query the active program's frame resolution, refreshing the cache.
    pub fn resolution(&mut self) -> ProtocolResult<Resolution> {
        self.ensure_open()?;
        let resolution = self.core.resolution()?;
        if let SessionState::Active { program, .. } = self.state {
            self.state = SessionState::Active { program, resolution };
        }
        Ok(resolution)
    }

    /// Current frame rate in frames per second.
    ///
    /// Ranges roughly 2..=62 depending on scene light, so it doubles as a
    /// crude light-level probe.
    pub fn frame_rate(&mut self) -> ProtocolResult<u8> {
        self.ensure_open()?;
        self.core.frame_rate()
    }

    /// Set both RC servo outputs. Positions range
    /// [`SERVO_MIN_POS`](crate::SERVO_MIN_POS)..=[`SERVO_MAX_POS`](crate::SERVO_MAX_POS).
    pub fn set_servos(&mut self, s0: u16, s1: u16) -> ProtocolResult<()> {
        self.ensure_open()?;
        self.core.set_servos(s0, s1)
    }

    /// Set the relative exposure level. Higher is brighter.
    pub fn set_camera_brightness(&mut self, brightness: u8) -> ProtocolResult<()> {
        self.ensure_open()?;
        self.core.set_camera_brightness(brightness)
    }

    /// Set the RGB LED, overriding the device's own use of it.
    pub fn set_led(&mut self, r: u8, g: u8, b: u8) -> ProtocolResult<()> {
        self.ensure_open()?;
        self.core.set_led(r, g, b)
    }

    /// Switch the two lamp channels on or off: `upper` drives the white
    /// LEDs along the top edge, `lower` drives the RGB LED at full white.
    pub fn set_lamp(&mut self, upper: bool, lower: bool) -> ProtocolResult<()> {
        self.ensure_open()?;
        self.core.set_lamp(upper, lower)
    }

    // ========================================================================
    // Program Switching
    // ========================================================================

    /// Switch the camera to `program` and query its frame resolution.
    ///
    /// The switch is issued even when `program` is already active, and the
    /// resolution is re-queried every time. On failure the cached program
    /// state is cleared: the camera may have half-switched, so the session
    /// no longer vouches for any resolution.
    pub fn change_program(&mut self, program: Program) -> ProtocolResult<Resolution> {
        self.ensure_open()?;
        debug!("switching to program {}", program);
        let resolution = match self.core.change_program(program) {
            Ok(resolution) => resolution,
            Err(err) => {
                warn!("program switch to {} failed: {}", program, err);
                self.state = SessionState::Uninitialized;
                return Err(err);
            }
        };
        if resolution.is_zero() {
            warn!("program switch to {} reported zero resolution", program);
            self.state = SessionState::Uninitialized;
            return Err(ProtocolError::ProgramSwitch(program));
        }
        self.state = SessionState::Active { program, resolution };
        Ok(resolution)
    }

    /// Switch to the color connected components program.
    ///
    /// Fails without issuing any query when the switch fails.
    pub fn color_program(&mut self) -> ProtocolResult<ColorProgram<'_, C>> {
        let resolution = self.change_program(Program::ColorConnectedComponents)?;
        Ok(ColorProgram {
            session: self,
            resolution,
        })
    }

    /// Switch to the line tracking program.
    pub fn line_program(&mut self) -> ProtocolResult<LineProgram<'_, C>> {
        let resolution = self.change_program(Program::LineTracking)?;
        Ok(LineProgram {
            session: self,
            resolution,
        })
    }

    /// Switch to the raw video program.
    pub fn video_program(&mut self) -> ProtocolResult<VideoProgram<'_, C>> {
        let resolution = self.change_program(Program::Video)?;
        Ok(VideoProgram {
            session: self,
            resolution,
        })
    }
}

impl<C: ProtocolCore> Drop for ProtocolSession<C> {
    fn drop(&mut self) {
        if self.opened {
            self.core.close();
        }
    }
}

// ============================================================================
// Program Handles
// ============================================================================

/// Handle to the color connected components program.
///
/// Holding the handle proves the forced switch succeeded; the handle carries
/// the frame resolution the device reported for this program.
pub struct ColorProgram<'a, C: ProtocolCore> {
    session: &'a mut ProtocolSession<C>,
    resolution: Resolution,
}

impl<C: ProtocolCore> core::fmt::Debug for ColorProgram<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorProgram")
            .field("resolution", &self.resolution)
            .finish()
    }
}

impl<C: ProtocolCore> ColorProgram<'_, C> {
    /// Frame resolution reported when this program was activated.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Fetch detected blocks, largest area first, as produced by the
    /// on-camera detector.
    ///
    /// With `wait` true the call blocks until a fresh frame exists; with
    /// `wait` false it returns immediately and `Ok(None)` means no new frame
    /// yet (distinct from `Ok(Some(empty))`, a frame with nothing detected).
    /// `sigmap` selects signatures, bit 7 selecting color-codes
    /// ([`SIGMAP_ALL`](crate::SIGMAP_ALL) for everything); `max_blocks` caps
    /// the count ([`MAX_BLOCKS_ALL`](crate::MAX_BLOCKS_ALL) for no cap).
    pub fn blocks(
        &mut self,
        wait: bool,
        sigmap: u8,
        max_blocks: u8,
    ) -> ProtocolResult<Option<Vec<Block>>> {
        trace!(
            "blocks query: wait={} sigmap={:#04x} max_blocks={}",
            wait,
            sigmap,
            max_blocks
        );
        self.session.core.blocks(wait, sigmap, max_blocks)
    }
}

/// Handle to the line tracking program.
pub struct LineProgram<'a, C: ProtocolCore> {
    session: &'a mut ProtocolSession<C>,
    resolution: Resolution,
}

impl<C: ProtocolCore> core::fmt::Debug for LineProgram<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LineProgram")
            .field("resolution", &self.resolution)
            .finish()
    }
}

impl<C: ProtocolCore> LineProgram<'_, C> {
    /// Frame resolution reported when this program was activated.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Fetch the currently tracked line, any intersection connected to it,
    /// and barcodes not yet reported. Each barcode and intersection is
    /// reported once.
    ///
    /// `features` is a bit mask of [`LINE_VECTOR`](crate::LINE_VECTOR),
    /// [`LINE_INTERSECTION`](crate::LINE_INTERSECTION) and
    /// [`LINE_BARCODE`](crate::LINE_BARCODE); `wait` behaves as in
    /// [`ColorProgram::blocks`].
    pub fn main_features(
        &mut self,
        features: u8,
        wait: bool,
    ) -> ProtocolResult<Option<LineFeatures>> {
        trace!("main features query: features={:#04x} wait={}", features, wait);
        self.session.core.main_features(features, wait)
    }

    /// Fetch every line, intersection, and barcode the tracker detects.
    pub fn all_features(
        &mut self,
        features: u8,
        wait: bool,
    ) -> ProtocolResult<Option<LineFeatures>> {
        trace!("all features query: features={:#04x} wait={}", features, wait);
        self.session.core.all_features(features, wait)
    }

    /// Set tracking mode bits: [`LINE_MODE_TURN_DELAYED`](crate::LINE_MODE_TURN_DELAYED),
    /// [`LINE_MODE_MANUAL_SELECT_VECTOR`](crate::LINE_MODE_MANUAL_SELECT_VECTOR),
    /// [`LINE_MODE_WHITE_LINE`](crate::LINE_MODE_WHITE_LINE).
    pub fn set_mode(&mut self, mode: u8) -> ProtocolResult<()> {
        self.session.core.set_line_mode(mode)
    }

    /// Set the turn to take at the next intersection only; consumed after
    /// use, after which the default turn applies again.
    ///
    /// Angles are degrees in (-180, 180], 0 straight ahead, positive left.
    pub fn set_next_turn(&mut self, angle: i16) -> ProtocolResult<()> {
        check_turn_angle(angle)?;
        self.session.core.set_next_turn(angle)
    }

    /// Set the default turn taken at intersections.
    pub fn set_default_turn(&mut self, angle: i16) -> ProtocolResult<()> {
        check_turn_angle(angle)?;
        self.session.core.set_default_turn(angle)
    }

    /// Select which candidate line is the tracked vector. Only meaningful
    /// while [`LINE_MODE_MANUAL_SELECT_VECTOR`](crate::LINE_MODE_MANUAL_SELECT_VECTOR)
    /// is set.
    pub fn set_vector(&mut self, index: u8) -> ProtocolResult<()> {
        self.session.core.set_vector(index)
    }

    /// Reverse the tracked vector's direction.
    pub fn reverse_vector(&mut self) -> ProtocolResult<()> {
        self.session.core.reverse_vector()
    }
}

/// Handle to the raw video program.
pub struct VideoProgram<'a, C: ProtocolCore> {
    session: &'a mut ProtocolSession<C>,
    resolution: Resolution,
}

impl<C: ProtocolCore> VideoProgram<'_, C> {
    /// Frame resolution reported when this program was activated.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Sample the 5x5 pixel neighborhood centered at (x, y), averaged to one
    /// RGB triple. Positions near the frame edge average fewer pixels.
    ///
    /// With `saturate` the triple is rescaled so its largest channel reaches
    /// 255; otherwise the raw average is returned.
    pub fn rgb(&mut self, x: u16, y: u16, saturate: bool) -> ProtocolResult<RgbSample> {
        trace!("rgb query: x={} y={} saturate={}", x, y, saturate);
        self.session.core.rgb(x, y, saturate)
    }
}

/// Turn angles live in (-180, 180].
fn check_turn_angle(angle: i16) -> ProtocolResult<()> {
    if angle <= -TURN_ANGLE_MAX || angle > TURN_ANGLE_MAX {
        return Err(ProtocolError::AngleOutOfRange(angle));
    }
    Ok(())
}
