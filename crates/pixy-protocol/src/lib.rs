//! Pixy2 Query Protocol
//!
//! This crate provides the host-side query protocol for a Pixy2 smart
//! camera: typed operations for each camera firmware program, the session
//! state machine that enforces the camera's one-active-program rule, and a
//! delimited-text encoding for hosts that can only pass a single primitive
//! value across their call boundary.
//!
//! # Protocol Overview
//!
//! The camera runs one firmware **program** at a time — color connected
//! components (blob detection), line tracking, or raw video — each with its
//! own data schema and frame resolution. A [`ProtocolSession`] owns a wire
//! core (the [`ProtocolCore`] implementation doing request framing and
//! checksum validation over a bus link) and exposes:
//!
//! - program-independent operations: version, servos, exposure, LED, lamp;
//! - program handles ([`ColorProgram`], [`LineProgram`], [`VideoProgram`])
//!   acquired through a forced program switch, carrying the program's
//!   frame resolution and its typed queries.
//!
//! Results can be flattened to delimited strings with the `encode` helpers.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixy_protocol::{ProtocolSession, MAX_BLOCKS_ALL, SIGMAP_ALL};
//!
//! let mut session = ProtocolSession::new(core);
//! let version = session.version()?;
//!
//! let mut color = session.color_program()?;
//! if let Some(blocks) = color.blocks(true, SIGMAP_ALL, MAX_BLOCKS_ALL)? {
//!     for block in &blocks {
//!         println!("sig {} at ({}, {})", block.signature, block.x, block.y);
//!     }
//! }
//! ```

mod constants;
mod encode;
mod error;
mod session;
mod types;
mod wire;

pub use constants::*;
pub use encode::*;
pub use error::*;
pub use session::*;
pub use types::*;
pub use wire::*;
