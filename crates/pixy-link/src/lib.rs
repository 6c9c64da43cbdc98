//! Pixy2 Bus Transports
//!
//! This crate provides the raw byte transports used to talk to a Pixy2 smart
//! camera over SPI or I2C. It deliberately knows nothing about the request
//! framing layered on top: a transport just moves bytes and, on the receive
//! side, keeps a running checksum the wire core can validate against.
//!
//! # Transport Overview
//!
//! Both transports implement the [`Link`] trait:
//!
//! - **SPI** ([`SpiLink`]): full-duplex transfers, 8-bit words, clock mode 3.
//!   Sends clock the payload out and discard the inbound bytes; receives
//!   clock out zeroes and capture the inbound bytes.
//! - **I2C** ([`I2cLink`]): addressed reads and writes. Writes longer than
//!   16 bytes are fragmented into addressed chunks issued with repeated-start
//!   so the bus transaction is held for the whole payload.
//!
//! The platform supplies the bus primitives by implementing [`SpiBus`] or
//! [`I2cBus`]; the links stay portable across HALs.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixy_link::{I2cLink, Link, LINK_ARG_DEFAULT};
//!
//! let mut link = I2cLink::new(bus);
//! link.open(LINK_ARG_DEFAULT)?; // use the sensor's default address
//! link.send(&request)?;
//! let mut response = [0u8; 16];
//! link.recv(&mut response, Some(&mut checksum))?;
//! ```

mod error;
mod i2c;
mod link;
mod spi;

pub use error::*;
pub use i2c::*;
pub use link::*;
pub use spi::*;
