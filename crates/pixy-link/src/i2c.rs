//! I2C transport.
//!
//! Writes are fragmented into chunks of at most [`I2C_MAX_WRITE`] bytes, one
//! addressed write per chunk. Every chunk (and every read) is issued with
//! repeated-start so the bus transaction is held for the whole exchange
//! instead of being released between chunks.

use log::trace;

use crate::error::{LinkError, LinkResult};
use crate::link::{Checksum, Link, LinkConfig, LINK_ARG_DEFAULT};

/// Default 7-bit bus address of the sensor.
pub const I2C_DEFAULT_ADDRESS: u8 = 0x54;
/// Maximum bytes per addressed write; longer payloads are fragmented.
pub const I2C_MAX_WRITE: usize = 16;

/// Addressed I2C bus primitives supplied by the platform.
pub trait I2cBus {
    /// Read `buf.len()` bytes from `address`.
    fn read(&mut self, address: u8, buf: &mut [u8], repeated_start: bool) -> LinkResult<()>;

    /// Write `data` to `address`.
    fn write(&mut self, address: u8, data: &[u8], repeated_start: bool) -> LinkResult<()>;
}

/// I2C link to the sensor.
#[derive(Debug)]
pub struct I2cLink<B: I2cBus> {
    bus: B,
    address: Option<u8>,
}

impl<B: I2cBus> I2cLink<B> {
    /// Create a link over `bus`. No address is bound until `open`.
    pub fn new(bus: B) -> Self {
        I2cLink { bus, address: None }
    }
}

impl<B: I2cBus> Link for I2cLink<B> {
    fn open(&mut self, arg: u32) -> LinkResult<()> {
        let address = if arg == LINK_ARG_DEFAULT {
            I2C_DEFAULT_ADDRESS
        } else {
            arg as u8
        };
        self.address = Some(address);
        trace!("i2c link opened at address {:#04x}", address);
        Ok(())
    }

    fn close(&mut self) {
        self.address = None;
    }

    fn config(&self) -> Option<LinkConfig> {
        self.address.map(|address| LinkConfig::I2c { address })
    }

    fn send(&mut self, data: &[u8]) -> LinkResult<usize> {
        let address = self.address.ok_or(LinkError::NotOpen)?;
        for chunk in data.chunks(I2C_MAX_WRITE) {
            // Abort on the first failed chunk; the caller cannot know which
            // prefix, if any, made it onto the bus.
            self.bus.write(address, chunk, true)?;
        }
        trace!("i2c sent {} bytes", data.len());
        Ok(data.len())
    }

    fn recv(&mut self, buf: &mut [u8], checksum: Option<&mut Checksum>) -> LinkResult<usize> {
        let address = self.address.ok_or(LinkError::NotOpen)?;
        self.bus.read(address, buf, true)?;
        if let Some(cs) = checksum {
            cs.reset();
            for &byte in buf.iter() {
                cs.add(byte);
            }
        }
        trace!("i2c received {} bytes", buf.len());
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// I2C bus double recording every addressed transaction.
    #[derive(Default)]
    struct RecordingI2c {
        writes: Vec<(u8, Vec<u8>, bool)>,
        reads: Vec<(u8, usize, bool)>,
        response: Vec<u8>,
        /// Fail the write with this index (0-based), if set.
        fail_write_at: Option<usize>,
    }

    impl I2cBus for RecordingI2c {
        fn read(&mut self, address: u8, buf: &mut [u8], repeated_start: bool) -> LinkResult<()> {
            self.reads.push((address, buf.len(), repeated_start));
            for (i, byte) in buf.iter_mut().enumerate() {
                *byte = self.response.get(i).copied().unwrap_or(0);
            }
            Ok(())
        }

        fn write(&mut self, address: u8, data: &[u8], repeated_start: bool) -> LinkResult<()> {
            if self.fail_write_at == Some(self.writes.len()) {
                return Err(LinkError::Bus);
            }
            self.writes.push((address, data.to_vec(), repeated_start));
            Ok(())
        }
    }

    fn opened_link(bus: RecordingI2c) -> I2cLink<RecordingI2c> {
        let mut link = I2cLink::new(bus);
        link.open(LINK_ARG_DEFAULT).expect("open should succeed");
        link
    }

    #[test]
    fn test_open_substitutes_default_address() {
        let link = opened_link(RecordingI2c::default());
        assert_eq!(link.config(), Some(LinkConfig::I2c { address: 0x54 }));
    }

    #[test]
    fn test_open_with_explicit_address() {
        let mut link = I2cLink::new(RecordingI2c::default());
        link.open(0x2A).expect("open should succeed");
        assert_eq!(link.config(), Some(LinkConfig::I2c { address: 0x2A }));
    }

    #[test]
    fn test_send_chunking() {
        // (payload length, expected chunk count, expected final chunk length)
        let cases = [
            (1usize, 1usize, 1usize),
            (15, 1, 15),
            (16, 1, 16),
            (17, 2, 1),
            (32, 2, 16),
            (33, 3, 1),
            (40, 3, 8),
        ];
        for (len, chunks, last) in cases {
            let mut link = opened_link(RecordingI2c::default());
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            assert_eq!(link.send(&data), Ok(len));
            assert_eq!(link.bus.writes.len(), chunks, "length {}", len);
            let (_, final_chunk, _) = link.bus.writes.last().expect("at least one chunk");
            assert_eq!(final_chunk.len(), last, "length {}", len);

            // Reassembling the chunks must give back the payload, and every
            // chunk must go to the bound address with repeated-start.
            let mut reassembled = Vec::new();
            for (address, chunk, repeated_start) in &link.bus.writes {
                assert_eq!(*address, I2C_DEFAULT_ADDRESS);
                assert!(*repeated_start);
                reassembled.extend_from_slice(chunk);
            }
            assert_eq!(reassembled, data);
        }
    }

    #[test]
    fn test_send_aborts_on_failed_chunk() {
        let mut bus = RecordingI2c::default();
        bus.fail_write_at = Some(1);
        let mut link = opened_link(bus);

        let data = [0u8; 40]; // three chunks
        assert_eq!(link.send(&data), Err(LinkError::Bus));
        // Only the chunk before the failure was issued.
        assert_eq!(link.bus.writes.len(), 1);
    }

    #[test]
    fn test_recv_requests_exact_length() {
        let mut link = opened_link(RecordingI2c::default());
        for len in [1usize, 16, 17, 64] {
            let mut buf = vec![0u8; len];
            assert_eq!(link.recv(&mut buf, None), Ok(len));
        }
        let lengths: Vec<usize> = link.bus.reads.iter().map(|(_, len, _)| *len).collect();
        assert_eq!(lengths, vec![1, 16, 17, 64]);
    }

    #[test]
    fn test_recv_accumulates_checksum() {
        let mut bus = RecordingI2c::default();
        bus.response = vec![0x10, 0x20, 0xF0];
        let mut link = opened_link(bus);

        let mut cs = Checksum::new();
        let mut buf = [0u8; 3];
        link.recv(&mut buf, Some(&mut cs)).expect("recv should succeed");
        assert_eq!(buf, [0x10, 0x20, 0xF0]);
        assert_eq!(cs.value(), 0x120);
    }

    #[test]
    fn test_unopened_link_rejects_io() {
        let mut link = I2cLink::new(RecordingI2c::default());
        assert_eq!(link.send(&[0]), Err(LinkError::NotOpen));
        let mut buf = [0u8; 1];
        assert_eq!(link.recv(&mut buf, None), Err(LinkError::NotOpen));
    }

    #[test]
    fn test_close_unbinds_address() {
        let mut link = opened_link(RecordingI2c::default());
        link.close();
        assert_eq!(link.config(), None);
        assert_eq!(link.send(&[0]), Err(LinkError::NotOpen));
    }
}
