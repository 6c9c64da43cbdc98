//! Protocol constants
//!
//! Program names, query bit masks, and device status codes shared by the
//! session and the wire core underneath it.

// ============================================================================
// Programs
// ============================================================================

/// Name of the color connected components (blob detection) program.
pub const PROG_COLOR_CONNECTED_COMPONENTS: &str = "color_connected_components";
/// Name of the line tracking program.
pub const PROG_LINE: &str = "line";
/// Name of the raw video program.
pub const PROG_VIDEO: &str = "video";

// ============================================================================
// Color Connected Components
// ============================================================================

/// Signature bitmap selecting all seven signatures plus color-codes.
pub const SIGMAP_ALL: u8 = 0xFF;
/// Bit of the signature bitmap reserved for color-code signatures.
pub const SIGMAP_COLOR_CODES: u8 = 0x80;
/// Block-count cap meaning "return every detected block".
pub const MAX_BLOCKS_ALL: u8 = 0xFF;

// ============================================================================
// Line Tracking
// ============================================================================

/// Request tracked line segments (vectors).
pub const LINE_VECTOR: u8 = 0x01;
/// Request intersections.
pub const LINE_INTERSECTION: u8 = 0x02;
/// Request barcodes.
pub const LINE_BARCODE: u8 = 0x04;
/// Request every feature kind.
pub const LINE_ALL_FEATURES: u8 = LINE_VECTOR | LINE_INTERSECTION | LINE_BARCODE;

/// Hold branch selection at intersections until the host picks a turn.
pub const LINE_MODE_TURN_DELAYED: u8 = 0x01;
/// The host selects the tracked vector explicitly via `set_vector`.
pub const LINE_MODE_MANUAL_SELECT_VECTOR: u8 = 0x02;
/// Track light lines on a dark background instead of dark on light.
pub const LINE_MODE_WHITE_LINE: u8 = 0x80;

/// Largest turn angle in degrees; angles live in (-180, 180], positive left.
pub const TURN_ANGLE_MAX: i16 = 180;

// ============================================================================
// Servos
// ============================================================================

/// Minimum RC servo position.
pub const SERVO_MIN_POS: u16 = 0;
/// Maximum RC servo position.
pub const SERVO_MAX_POS: u16 = 1000;

// ============================================================================
// Device Status Codes
// ============================================================================

/// Operation completed.
pub const STATUS_OK: i8 = 0;
/// Generic failure.
pub const STATUS_ERROR: i8 = -1;
/// The device is busy with the current frame.
pub const STATUS_BUSY: i8 = -2;
/// The response checksum did not match its payload.
pub const STATUS_CHECKSUM_ERROR: i8 = -3;
/// No response arrived within the wire core's deadline.
pub const STATUS_TIMEOUT: i8 = -4;
/// The user button is overriding host control.
pub const STATUS_BUTTON_OVERRIDE: i8 = -5;
/// A program change is still in progress.
pub const STATUS_PROG_CHANGING: i8 = -6;
