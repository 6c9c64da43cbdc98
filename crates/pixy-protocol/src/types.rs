//! Typed results returned by the camera.

use std::fmt;

use crate::constants::*;

/// A firmware program the camera can run.
///
/// Each program exposes its own data schema and frame resolution; query
/// results are only meaningful while their program is the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    /// Color connected components (blob detection).
    ColorConnectedComponents,
    /// Line tracking.
    LineTracking,
    /// Raw video (pixel sampling).
    Video,
}

impl Program {
    /// Program name as understood by the device.
    pub fn name(&self) -> &'static str {
        match self {
            Program::ColorConnectedComponents => PROG_COLOR_CONNECTED_COMPONENTS,
            Program::LineTracking => PROG_LINE,
            Program::Video => PROG_VIDEO,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frame resolution of a program, queried from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Frame width in pixels.
    pub width: u16,
    /// Frame height in pixels.
    pub height: u16,
}

impl Resolution {
    /// A zero-by-zero resolution is the device's "switch failed" signal.
    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Hardware and firmware version information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    /// Hardware revision.
    pub hardware: u16,
    /// Firmware major version.
    pub firmware_major: u8,
    /// Firmware minor version.
    pub firmware_minor: u8,
    /// Firmware build number.
    pub firmware_build: u16,
    /// Firmware type.
    pub firmware_type: u8,
}

/// A detected color block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Signature id, or color-code for multi-signature codes.
    pub signature: u16,
    /// Center x in pixels.
    pub x: u16,
    /// Center y in pixels.
    pub y: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Orientation in degrees (meaningful for color-codes).
    pub angle: i16,
    /// Tracking index, stable while the block stays in view.
    pub index: u8,
    /// Frames the block has been tracked for (saturating).
    pub age: u8,
}

impl Block {
    /// Block area in pixels.
    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }
}

/// A tracked line segment, in line-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// Tail x.
    pub x0: u8,
    /// Tail y.
    pub y0: u8,
    /// Head x.
    pub x1: u8,
    /// Head y.
    pub y1: u8,
    /// Tracking index.
    pub index: u8,
    /// Feature flags.
    pub flags: u8,
}

/// One branch of an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionLine {
    /// Index of the branching line.
    pub index: u8,
    /// Reserved by the device.
    pub reserved: u8,
    /// Branch angle in degrees.
    pub angle: i16,
}

/// A junction where the tracked line branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersection {
    /// Junction x, in line-grid coordinates.
    pub x: u8,
    /// Junction y, in line-grid coordinates.
    pub y: u8,
    /// Reserved by the device.
    pub reserved: u8,
    /// The branching lines, in device order.
    pub lines: Vec<IntersectionLine>,
}

impl Intersection {
    /// Number of branching lines.
    pub fn branches(&self) -> u8 {
        self.lines.len() as u8
    }
}

/// A decoded barcode marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barcode {
    /// Marker x, in line-grid coordinates.
    pub x: u8,
    /// Marker y, in line-grid coordinates.
    pub y: u8,
    /// Feature flags.
    pub flags: u8,
    /// Decoded code value.
    pub code: u8,
}

/// Line-tracking features from one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFeatures {
    /// Tracked line segments.
    pub vectors: Vec<Vector>,
    /// Junctions.
    pub intersections: Vec<Intersection>,
    /// Decoded markers.
    pub barcodes: Vec<Barcode>,
}

impl LineFeatures {
    /// True when the frame produced no features of any kind.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty() && self.intersections.is_empty() && self.barcodes.is_empty()
    }
}

/// An averaged RGB pixel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbSample {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Any typed query result, for encoding across a primitive-only boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// Version query result.
    Version(VersionInfo),
    /// Frame resolution of the active program.
    Resolution(Resolution),
    /// Color blocks, sorted by descending area.
    Blocks(Vec<Block>),
    /// Line-tracking features.
    LineFeatures(LineFeatures),
    /// Averaged RGB sample.
    Rgb(RgbSample),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_names() {
        assert_eq!(
            Program::ColorConnectedComponents.name(),
            "color_connected_components"
        );
        assert_eq!(Program::LineTracking.name(), "line");
        assert_eq!(Program::Video.name(), "video");
        assert_eq!(Program::LineTracking.to_string(), "line");
    }

    #[test]
    fn test_resolution_zero_signal() {
        assert!(Resolution::default().is_zero());
        assert!(!Resolution { width: 316, height: 208 }.is_zero());
        assert!(!Resolution { width: 0, height: 208 }.is_zero());
    }

    #[test]
    fn test_block_area() {
        let block = Block {
            signature: 1,
            x: 0,
            y: 0,
            width: 300,
            height: 200,
            angle: 0,
            index: 0,
            age: 0,
        };
        assert_eq!(block.area(), 60_000);
    }

    #[test]
    fn test_intersection_branch_count() {
        let mut intersection = Intersection {
            x: 10,
            y: 20,
            reserved: 0,
            lines: Vec::new(),
        };
        assert_eq!(intersection.branches(), 0);
        intersection.lines.push(IntersectionLine {
            index: 1,
            reserved: 0,
            angle: 45,
        });
        assert_eq!(intersection.branches(), 1);
    }

    #[test]
    fn test_line_features_empty() {
        let mut features = LineFeatures::default();
        assert!(features.is_empty());
        features.barcodes.push(Barcode {
            x: 1,
            y: 2,
            flags: 0,
            code: 7,
        });
        assert!(!features.is_empty());
    }
}
