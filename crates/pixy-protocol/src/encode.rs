//! Delimited-text encoding of query results.
//!
//! Some hosts sit behind a call boundary that can only carry a single
//! primitive value, so typed results are flattened into one delimited
//! string. The grammar has four fixed levels and never escapes — every
//! payload field is numeric, so the delimiters cannot collide:
//!
//! ```text
//! field     ,
//! record    ;
//! sub-list  |
//! section   \n
//! ```
//!
//! Line features use all four levels:
//!
//! ```text
//! x0,y0,x1,y1,index,flags;...              (vectors)
//! x,y,n,reserved|index,reserved,angle|...  (intersections)
//! x,y,flags,code;...                       (barcodes)
//! ```
//!
//! A failed or not-yet-available result is an absent string, never a
//! well-formed empty record; a produced-but-empty list encodes to an empty
//! string, so "no result this call" stays distinguishable from "zero items".

use std::fmt::Write;

use crate::types::{Block, LineFeatures, QueryResult, Resolution, RgbSample, VersionInfo};

/// Separates fields within a record.
pub const FIELD_SEPARATOR: char = ',';
/// Separates records within a list.
pub const RECORD_SEPARATOR: char = ';';
/// Separates an intersection's sub-lines.
pub const SUBLIST_SEPARATOR: char = '|';
/// Separates the three line-feature sections.
pub const SECTION_SEPARATOR: char = '\n';

impl QueryResult {
    /// Encode this result into one delimited string.
    pub fn encode(&self) -> String {
        match self {
            QueryResult::Version(version) => encode_version(version),
            QueryResult::Resolution(resolution) => encode_resolution(*resolution),
            QueryResult::Blocks(blocks) => encode_blocks(blocks),
            QueryResult::LineFeatures(features) => encode_features(features),
            QueryResult::Rgb(rgb) => encode_rgb(*rgb),
        }
    }
}

/// Encode an optional result, keeping "no result this call" absent.
pub fn encode_result(result: Option<&QueryResult>) -> Option<String> {
    result.map(QueryResult::encode)
}

/// Encode a version record: `hardware,major,minor,build,type`.
pub fn encode_version(version: &VersionInfo) -> String {
    format!(
        "{},{},{},{},{}",
        version.hardware,
        version.firmware_major,
        version.firmware_minor,
        version.firmware_build,
        version.firmware_type
    )
}

/// Encode a resolution record: `width,height`.
pub fn encode_resolution(resolution: Resolution) -> String {
    format!("{},{}", resolution.width, resolution.height)
}

/// Encode an RGB sample: `r,g,b`.
pub fn encode_rgb(rgb: RgbSample) -> String {
    format!("{},{},{}", rgb.r, rgb.g, rgb.b)
}

/// Encode a block list, one record per block, no trailing separator.
pub fn encode_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push(RECORD_SEPARATOR);
        }
        let _ = write!(
            out,
            "{},{},{},{},{},{},{},{}",
            block.signature,
            block.x,
            block.y,
            block.width,
            block.height,
            block.angle,
            block.index,
            block.age
        );
    }
    out
}

/// Encode line features as three newline-joined sections: vectors,
/// intersections, barcodes.
///
/// An intersection record is its four scalars, a `|`, then its sub-lines
/// joined by `|` — so a branchless intersection ends in a bare `|`.
pub fn encode_features(features: &LineFeatures) -> String {
    let mut out = String::new();
    for (i, vector) in features.vectors.iter().enumerate() {
        if i > 0 {
            out.push(RECORD_SEPARATOR);
        }
        let _ = write!(
            out,
            "{},{},{},{},{},{}",
            vector.x0, vector.y0, vector.x1, vector.y1, vector.index, vector.flags
        );
    }
    out.push(SECTION_SEPARATOR);
    for (i, intersection) in features.intersections.iter().enumerate() {
        if i > 0 {
            out.push(RECORD_SEPARATOR);
        }
        let _ = write!(
            out,
            "{},{},{},{}",
            intersection.x,
            intersection.y,
            intersection.branches(),
            intersection.reserved
        );
        out.push(SUBLIST_SEPARATOR);
        for (j, line) in intersection.lines.iter().enumerate() {
            if j > 0 {
                out.push(SUBLIST_SEPARATOR);
            }
            let _ = write!(out, "{},{},{}", line.index, line.reserved, line.angle);
        }
    }
    out.push(SECTION_SEPARATOR);
    for (i, barcode) in features.barcodes.iter().enumerate() {
        if i > 0 {
            out.push(RECORD_SEPARATOR);
        }
        let _ = write!(
            out,
            "{},{},{},{}",
            barcode.x, barcode.y, barcode.flags, barcode.code
        );
    }
    out
}
