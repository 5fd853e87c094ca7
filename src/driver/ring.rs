//! Packet memory layout and receive ring arithmetic
//!
//! The 8 KB packet memory is split into a receive ring `[rx_start, rx_end]`
//! and a transmit region `[tx_start, tx_end]`. Everything in this module is
//! pure pointer math; the bus side lives in `memory.rs`.

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    BUFFER_MEMORY_END, DEFAULT_RX_END, DEFAULT_RX_START, DEFAULT_TX_END, DEFAULT_TX_START,
};

/// Split of the on-chip packet memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferLayout {
    /// First byte of the receive ring
    pub rx_start: u16,
    /// Last byte of the receive ring (must be odd)
    pub rx_end: u16,
    /// First byte of the transmit region (holds the control byte)
    pub tx_start: u16,
    /// Last byte of the transmit region
    pub tx_end: u16,
}

impl Default for BufferLayout {
    fn default() -> Self {
        Self::new(DEFAULT_RX_START, DEFAULT_RX_END, DEFAULT_TX_START, DEFAULT_TX_END)
    }
}

impl BufferLayout {
    /// Create a layout from explicit bounds (inclusive)
    #[must_use]
    pub const fn new(rx_start: u16, rx_end: u16, tx_start: u16, tx_end: u16) -> Self {
        Self {
            rx_start,
            rx_end,
            tx_start,
            tx_end,
        }
    }

    /// Check the layout against the packet memory rules
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.rx_start > self.rx_end || self.rx_end > BUFFER_MEMORY_END {
            return Err(ConfigError::InvalidRxRegion);
        }
        if self.rx_end & 1 == 0 {
            return Err(ConfigError::EvenRxEnd);
        }
        if self.tx_start > self.tx_end || self.tx_end > BUFFER_MEMORY_END {
            return Err(ConfigError::InvalidTxRegion);
        }
        if self.tx_start <= self.rx_end && self.rx_start <= self.tx_end {
            return Err(ConfigError::RegionOverlap);
        }
        Ok(())
    }

    /// Number of bytes in the receive ring
    #[inline(always)]
    #[must_use]
    pub const fn rx_size(&self) -> u16 {
        self.rx_end - self.rx_start + 1
    }

    /// Number of bytes in the transmit region
    #[inline(always)]
    #[must_use]
    pub const fn tx_size(&self) -> u16 {
        self.tx_end - self.tx_start + 1
    }

    /// True if `address` falls inside the receive ring
    #[inline(always)]
    #[must_use]
    pub const fn contains_rx(&self, address: u16) -> bool {
        address >= self.rx_start && address <= self.rx_end
    }

    /// Move `offset` bytes forward from `address` inside the receive ring
    ///
    /// `address` must lie in the ring.
    #[must_use]
    pub const fn advance_rx(&self, address: u16, offset: usize) -> u16 {
        let size = self.rx_size() as usize;
        let relative = (address - self.rx_start) as usize;
        self.rx_start + ((relative + offset) % size) as u16
    }

    /// Bytes from `address` up to and including `rx_end`
    ///
    /// `address` must lie in the ring.
    #[inline(always)]
    #[must_use]
    pub const fn bytes_until_wrap(&self, address: u16) -> usize {
        (self.rx_end - address) as usize + 1
    }

    /// ERXRDPT value that frees everything before `next_packet`
    ///
    /// The chip wants the read pointer one byte behind the next status
    /// header. When that would leave the ring (next packet at `rx_start`, or
    /// a pointer past `rx_end`), the pointer is clamped to `rx_end` and the
    /// chip wraps on its own.
    #[must_use]
    pub const fn rx_read_pointer(&self, next_packet: u16) -> u16 {
        if next_packet <= self.rx_start || next_packet - 1 > self.rx_end {
            self.rx_end
        } else {
            next_packet - 1
        }
    }

    /// Free bytes in the receive ring given the chip's write and read pointers
    ///
    /// Equal pointers report `(rx_end - rx_start) - 1` so a full ring and an
    /// empty ring are never confused.
    #[must_use]
    pub const fn free_space(&self, write_ptr: u16, read_ptr: u16) -> u16 {
        let span = self.rx_end - self.rx_start;
        if write_ptr > read_ptr {
            span.saturating_sub(write_ptr - read_ptr)
        } else if write_ptr == read_ptr {
            span.saturating_sub(1)
        } else {
            read_ptr - write_ptr - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn default_layout_is_valid() {
        let layout = BufferLayout::default();
        assert_eq!(layout.rx_start, 0x0000);
        assert_eq!(layout.rx_end, 0x0BFF);
        assert_eq!(layout.tx_start, 0x0C00);
        assert_eq!(layout.tx_end, 0x11FF);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn even_rx_end_rejected() {
        let layout = BufferLayout::new(0x0000, 0x0BFE, 0x0C00, 0x11FF);
        assert_eq!(layout.validate(), Err(ConfigError::EvenRxEnd));
    }

    #[test]
    fn inverted_or_oversized_regions_rejected() {
        assert_eq!(
            BufferLayout::new(0x0C00, 0x0BFF, 0x1000, 0x11FF).validate(),
            Err(ConfigError::InvalidRxRegion)
        );
        assert_eq!(
            BufferLayout::new(0x0000, 0x0BFF, 0x1200, 0x2000).validate(),
            Err(ConfigError::InvalidTxRegion)
        );
        assert_eq!(
            BufferLayout::new(0x0000, 0x0BFF, 0x1200, 0x11FF).validate(),
            Err(ConfigError::InvalidTxRegion)
        );
    }

    #[test]
    fn overlapping_regions_rejected() {
        assert_eq!(
            BufferLayout::new(0x0000, 0x0BFF, 0x0BFF, 0x11FF).validate(),
            Err(ConfigError::RegionOverlap)
        );
        // Transmit region below the receive ring is fine
        assert!(BufferLayout::new(0x0600, 0x1FFF, 0x0000, 0x05FF).validate().is_ok());
    }

    // =========================================================================
    // Ring Arithmetic Tests
    // =========================================================================

    #[test]
    fn advance_wraps_to_start() {
        let layout = BufferLayout::default();
        assert_eq!(layout.advance_rx(0x0100, 6), 0x0106);
        assert_eq!(layout.advance_rx(0x0BFE, 1), 0x0BFF);
        assert_eq!(layout.advance_rx(0x0BFE, 2), 0x0000);
        assert_eq!(layout.advance_rx(0x0BFE, 8), 0x0006);

        let offset = BufferLayout::new(0x0600, 0x1FFF, 0x0000, 0x05FF);
        assert_eq!(offset.advance_rx(0x1FFC, 6), 0x0602);
    }

    #[test]
    fn bytes_until_wrap_counts_rx_end() {
        let layout = BufferLayout::default();
        assert_eq!(layout.bytes_until_wrap(0x0BFE), 2);
        assert_eq!(layout.bytes_until_wrap(0x0BFF), 1);
        assert_eq!(layout.bytes_until_wrap(0x0000), 0x0C00);
    }

    #[test]
    fn read_pointer_is_one_behind_next_packet() {
        let layout = BufferLayout::default();
        assert_eq!(layout.rx_read_pointer(0x0100), 0x00FF);
        assert_eq!(layout.rx_read_pointer(0x0BFF), 0x0BFE);
    }

    #[test]
    fn read_pointer_clamps_instead_of_wrapping() {
        let layout = BufferLayout::default();
        assert_eq!(layout.rx_read_pointer(0x0000), 0x0BFF);
        assert_eq!(layout.rx_read_pointer(0x0D00), 0x0BFF);

        let offset = BufferLayout::new(0x0600, 0x1FFF, 0x0000, 0x05FF);
        assert_eq!(offset.rx_read_pointer(0x0600), 0x1FFF);
        assert_eq!(offset.rx_read_pointer(0x0100), 0x1FFF);
    }

    #[test]
    fn free_space_equal_pointers_is_span_minus_one() {
        let layout = BufferLayout::default();
        assert_eq!(layout.free_space(0x0200, 0x0200), 0x0BFF - 1);
        assert_eq!(layout.free_space(0x0000, 0x0000), 0x0BFE);
    }

    #[test]
    fn free_space_write_ahead_of_read() {
        let layout = BufferLayout::default();
        assert_eq!(layout.free_space(0x0300, 0x0100), 0x0BFF - 0x0200);
    }

    #[test]
    fn free_space_write_behind_read() {
        let layout = BufferLayout::default();
        assert_eq!(layout.free_space(0x0100, 0x0300), 0x01FF);
        assert_eq!(layout.free_space(0x0100, 0x0101), 0);
    }
}
