//! Frame reception.
//!
//! The chip appends received frames to the receive ring, each preceded by a
//! 6-byte status vector whose first field points at the next header. The
//! driver keeps its own cursor (`next_packet`) and, after each frame is
//! consumed, moves ERXRDPT one byte behind the next header and decrements
//! EPKTCNT so the space can be reused.

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::{IoError, Result};
use crate::frame::{PacketStatusHeader, RX_HEADER_SIZE, RX_STATUS_VECTOR_SIZE};
use crate::hal::bus::BusTransport;
use crate::internal::constants::FREE_SPACE_SAMPLE_ATTEMPTS;
use crate::internal::register::bits::econ2;
use crate::internal::register::eth;

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    /// Number of frames waiting in the receive ring (EPKTCNT)
    pub fn pending_packets(&mut self) -> Result<u8> {
        self.ensure_initialized()?;
        self.read_register(eth::EPKTCNT)
    }

    /// Decode the header of the next frame without consuming it
    ///
    /// Fails with [`IoError::NoPacketPending`] when the ring is empty and
    /// with [`IoError::CorruptHeader`] when the next-packet pointer leaves
    /// the ring; the latter needs a re-[`init`](Self::init).
    pub fn peek_header(&mut self) -> Result<PacketStatusHeader> {
        if self.pending_packets()? == 0 {
            return Err(IoError::NoPacketPending.into());
        }

        let mut raw = [0u8; RX_HEADER_SIZE];
        self.read_ring(self.next_packet, &mut raw)?;
        let header = PacketStatusHeader::parse(&raw);

        let layout = self.config.layout;
        if !layout.contains_rx(header.next_packet)
            || header.byte_count as usize > layout.rx_size() as usize
        {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "RX: corrupt header at {=u16:#x}: next {=u16:#x}, count {=u16}",
                self.next_packet,
                header.next_packet,
                header.byte_count
            );
            return Err(IoError::CorruptHeader.into());
        }
        Ok(header)
    }

    /// Copy part of the next frame into `dest`, starting `offset` bytes into the frame
    ///
    /// `header` must come from [`peek_header`](Self::peek_header) for the
    /// same frame. Returns the number of bytes copied, bounded by the
    /// frame's available length under the configured
    /// [`ReceiveLengthPolicy`](super::config::ReceiveLengthPolicy).
    pub fn read_packet_slice(
        &mut self,
        header: &PacketStatusHeader,
        dest: &mut [u8],
        offset: usize,
    ) -> Result<usize> {
        let available = header.available_length(self.config.receive_length);
        let count = dest.len().min(available.saturating_sub(offset));
        if count == 0 {
            return Ok(0);
        }
        let start = self
            .config
            .layout
            .advance_rx(self.next_packet, RX_STATUS_VECTOR_SIZE + offset);
        self.read_ring(start, &mut dest[..count])?;
        Ok(count)
    }

    /// Receive the next frame into `buf`
    ///
    /// Returns the number of bytes copied. A frame longer than `buf` is
    /// truncated and the remainder discarded. A frame the chip flagged as
    /// bad is consumed and reported as [`IoError::FrameError`].
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.ensure_initialized()?;
        if !self.rx_started {
            let rx_start = self.config.layout.rx_start;
            self.write_register_pair(eth::ERXRDPTL, rx_start)?;
            self.rx_started = true;
        }

        let header = self.peek_header()?;
        if !header.status.received_ok() {
            #[cfg(feature = "defmt")]
            defmt::debug!("RX: dropping bad frame, status {=u16:#x}", header.status.raw());
            self.consume(&header)?;
            return Err(IoError::FrameError.into());
        }

        let copied = self.read_packet_slice(&header, buf, 0)?;
        self.consume(&header)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("RX: {} bytes", copied);

        Ok(copied)
    }

    /// Discard the next frame
    pub fn drop_packet(&mut self) -> Result<()> {
        let header = self.peek_header()?;
        self.consume(&header)
    }

    fn consume(&mut self, header: &PacketStatusHeader) -> Result<()> {
        // ERXRDPT now trails the cursor; the first-receive rewind must not run again
        self.rx_started = true;
        self.next_packet = header.next_packet;
        let read_ptr = self.config.layout.rx_read_pointer(header.next_packet);
        self.write_register_pair(eth::ERXRDPTL, read_ptr)?;
        self.set_bits(eth::ECON2, econ2::PKTDEC)
    }

    /// Free bytes in the receive ring
    ///
    /// ERXWRPT is sampled between two EPKTCNT reads until both reads agree,
    /// so a frame landing mid-read cannot skew the result.
    pub fn free_space(&mut self) -> Result<u16> {
        self.ensure_initialized()?;

        let mut attempts = 0;
        let write_ptr = loop {
            let before = self.read_register(eth::EPKTCNT)?;
            let write_ptr = self.read_register_pair(eth::ERXWRPTL)?;
            let after = self.read_register(eth::EPKTCNT)?;
            if before == after {
                break write_ptr;
            }
            attempts += 1;
            if attempts >= FREE_SPACE_SAMPLE_ATTEMPTS {
                return Err(IoError::Timeout.into());
            }
        };
        let read_ptr = self.read_register_pair(eth::ERXRDPTL)?;
        Ok(self.config.layout.free_space(write_ptr, read_ptr))
    }
}
