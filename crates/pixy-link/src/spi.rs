//! SPI transport.
//!
//! The sensor speaks SPI with 8-bit words in clock mode 3, at up to 2 MHz.
//! Every bus transaction is a symmetric full-duplex transfer: a send clocks
//! the payload out and discards whatever comes back, a receive clocks zeroes
//! out and captures the inbound bytes.

use log::trace;

use crate::error::{LinkError, LinkResult};
use crate::link::{Checksum, Link, LinkConfig};

/// Word size the sensor requires, in bits.
pub const SPI_WORD_BITS: u8 = 8;
/// Clock mode the sensor requires (CPOL=1, CPHA=1).
pub const SPI_CLOCK_MODE: u8 = 3;
/// Maximum clock rate the sensor supports, in Hz.
pub const SPI_CLOCK_RATE_HZ: u32 = 2_000_000;

/// Full-duplex SPI bus primitives supplied by the platform.
pub trait SpiBus {
    /// Configure word size and clock mode.
    fn format(&mut self, bits: u8, mode: u8);

    /// Perform one full-duplex transfer. `tx` and `rx` have the same length.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> LinkResult<()>;
}

/// SPI link to the sensor.
#[derive(Debug)]
pub struct SpiLink<B: SpiBus> {
    bus: B,
    opened: bool,
}

impl<B: SpiBus> SpiLink<B> {
    /// Create a link over `bus`. The bus is not configured until `open`.
    pub fn new(bus: B) -> Self {
        SpiLink { bus, opened: false }
    }
}

impl<B: SpiBus> Link for SpiLink<B> {
    fn open(&mut self, _arg: u32) -> LinkResult<()> {
        self.bus.format(SPI_WORD_BITS, SPI_CLOCK_MODE);
        self.opened = true;
        trace!("spi link opened ({} bits, mode {})", SPI_WORD_BITS, SPI_CLOCK_MODE);
        Ok(())
    }

    fn close(&mut self) {
        // Raw SPI peripherals expose no explicit release.
        self.opened = false;
    }

    fn config(&self) -> Option<LinkConfig> {
        self.opened.then_some(LinkConfig::Spi {
            bits: SPI_WORD_BITS,
            mode: SPI_CLOCK_MODE,
        })
    }

    fn send(&mut self, data: &[u8]) -> LinkResult<usize> {
        if !self.opened {
            return Err(LinkError::NotOpen);
        }
        let mut discard = vec![0u8; data.len()];
        self.bus.transfer(data, &mut discard)?;
        trace!("spi sent {} bytes", data.len());
        Ok(data.len())
    }

    fn recv(&mut self, buf: &mut [u8], checksum: Option<&mut Checksum>) -> LinkResult<usize> {
        if !self.opened {
            return Err(LinkError::NotOpen);
        }
        let tx = vec![0u8; buf.len()];
        self.bus.transfer(&tx, buf)?;
        if let Some(cs) = checksum {
            cs.reset();
            for &byte in buf.iter() {
                cs.add(byte);
            }
        }
        trace!("spi received {} bytes", buf.len());
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LINK_ARG_DEFAULT;

    /// SPI bus double that records every transfer and plays back a canned
    /// response.
    #[derive(Default)]
    struct RecordingSpi {
        formats: Vec<(u8, u8)>,
        transfers: Vec<Vec<u8>>,
        response: Vec<u8>,
        fail: bool,
    }

    impl SpiBus for RecordingSpi {
        fn format(&mut self, bits: u8, mode: u8) {
            self.formats.push((bits, mode));
        }

        fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> LinkResult<()> {
            if self.fail {
                return Err(LinkError::Bus);
            }
            self.transfers.push(tx.to_vec());
            for (i, byte) in rx.iter_mut().enumerate() {
                *byte = self.response.get(i).copied().unwrap_or(0);
            }
            Ok(())
        }
    }

    fn opened_link(bus: RecordingSpi) -> SpiLink<RecordingSpi> {
        let mut link = SpiLink::new(bus);
        link.open(LINK_ARG_DEFAULT).expect("open should succeed");
        link
    }

    #[test]
    fn test_open_configures_sensor_format() {
        let link = opened_link(RecordingSpi::default());
        assert_eq!(link.bus.formats, vec![(8, 3)]);
        assert_eq!(
            link.config(),
            Some(LinkConfig::Spi { bits: 8, mode: 3 })
        );
    }

    #[test]
    fn test_send_transfers_whole_buffer() {
        let mut link = opened_link(RecordingSpi::default());
        let data = [0xAE, 0xC1, 0x0E, 0x00];
        assert_eq!(link.send(&data), Ok(4));
        assert_eq!(link.bus.transfers, vec![data.to_vec()]);
    }

    #[test]
    fn test_recv_clocks_out_zeroes() {
        let mut bus = RecordingSpi::default();
        bus.response = vec![1, 2, 3, 4, 5];
        let mut link = opened_link(bus);

        let mut buf = [0u8; 5];
        assert_eq!(link.recv(&mut buf, None), Ok(5));
        assert_eq!(buf, [1, 2, 3, 4, 5]);
        // The outbound half of the transfer must be all zeroes.
        assert_eq!(link.bus.transfers, vec![vec![0u8; 5]]);
    }

    #[test]
    fn test_recv_requests_exact_length() {
        let mut link = opened_link(RecordingSpi::default());
        for len in [1usize, 7, 16, 33] {
            let mut buf = vec![0u8; len];
            assert_eq!(link.recv(&mut buf, None), Ok(len));
        }
    }

    #[test]
    fn test_recv_accumulates_checksum_of_received_bytes_only() {
        let mut bus = RecordingSpi::default();
        bus.response = vec![10, 20, 30];
        let mut link = opened_link(bus);

        // A prior send must not contribute to the sum.
        link.send(&[0xFF, 0xFF]).expect("send should succeed");

        let mut cs = Checksum::new();
        cs.add(99); // stale value, recv must reset it
        let mut buf = [0u8; 3];
        link.recv(&mut buf, Some(&mut cs)).expect("recv should succeed");
        assert_eq!(cs.value(), 60);
    }

    #[test]
    fn test_bus_failure_collapses_to_single_signal() {
        let mut bus = RecordingSpi::default();
        bus.fail = true;
        let mut link = opened_link(bus);
        assert_eq!(link.send(&[1, 2, 3]), Err(LinkError::Bus));
        let mut buf = [0u8; 2];
        assert_eq!(link.recv(&mut buf, None), Err(LinkError::Bus));
    }

    #[test]
    fn test_unopened_link_rejects_io() {
        let mut link = SpiLink::new(RecordingSpi::default());
        assert_eq!(link.config(), None);
        assert_eq!(link.send(&[0]), Err(LinkError::NotOpen));
        let mut buf = [0u8; 1];
        assert_eq!(link.recv(&mut buf, None), Err(LinkError::NotOpen));
    }
}
