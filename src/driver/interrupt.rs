//! Interrupt flag handling.
//!
//! This module provides the [`InterruptStatus`] structure for parsing EIR and
//! the driver operations that read, clear and enable interrupt sources.
//!
//! EIR.PKTIF is not a latched flag: it follows EPKTCNT and clears once every
//! pending frame has been consumed, so [`Enc28j60::clear_interrupts`] never
//! touches it.

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::Result;
use crate::hal::bus::BusTransport;
use crate::internal::register::bits::{eie, eir};
use crate::internal::register::eth;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt flags parsed from EIR
///
/// # Example
///
/// ```ignore
/// let status = enc.interrupt_status()?;
/// if status.packet_pending {
///     while enc.pending_packets()? > 0 {
///         let len = enc.receive(&mut buf)?;
///     }
/// }
/// if status.has_error() {
///     enc.clear_interrupts(status)?;
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// At least one frame waits in the receive ring (PKTIF)
    pub packet_pending: bool,
    /// DMA copy or checksum finished (DMAIF)
    pub dma_complete: bool,
    /// PHY link state changed (LINKIF)
    pub link_changed: bool,
    /// Transmission finished (TXIF)
    pub tx_complete: bool,
    /// Transmission aborted (TXERIF)
    pub tx_error: bool,
    /// Frame dropped: ring full or EPKTCNT saturated (RXERIF)
    pub rx_error: bool,
}

impl InterruptStatus {
    /// Every flag set
    #[must_use]
    pub const fn all() -> Self {
        Self {
            packet_pending: true,
            dma_complete: true,
            link_changed: true,
            tx_complete: true,
            tx_error: true,
            rx_error: true,
        }
    }

    /// Create from a raw EIR value
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            packet_pending: raw & eir::PKTIF != 0,
            dma_complete: raw & eir::DMAIF != 0,
            link_changed: raw & eir::LINKIF != 0,
            tx_complete: raw & eir::TXIF != 0,
            tx_error: raw & eir::TXERIF != 0,
            rx_error: raw & eir::RXERIF != 0,
        }
    }

    /// Raw EIR bits
    #[inline]
    #[must_use]
    pub const fn to_raw(&self) -> u8 {
        let mut raw = 0;
        if self.packet_pending {
            raw |= eir::PKTIF;
        }
        if self.dma_complete {
            raw |= eir::DMAIF;
        }
        if self.link_changed {
            raw |= eir::LINKIF;
        }
        if self.tx_complete {
            raw |= eir::TXIF;
        }
        if self.tx_error {
            raw |= eir::TXERIF;
        }
        if self.rx_error {
            raw |= eir::RXERIF;
        }
        raw
    }

    /// Check if any flag is set
    #[inline]
    #[must_use]
    pub const fn any(&self) -> bool {
        self.to_raw() != 0
    }

    /// Check for transmit or receive errors
    #[inline]
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.tx_error || self.rx_error
    }
}

// =============================================================================
// Driver Operations
// =============================================================================

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    /// Read the interrupt flags
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus> {
        Ok(InterruptStatus::from_raw(self.read_register(eth::EIR)?))
    }

    /// Clear the flags set in `status` (PKTIF excluded)
    pub fn clear_interrupts(&mut self, status: InterruptStatus) -> Result<()> {
        let mask = status.to_raw() & !eir::PKTIF;
        if mask == 0 {
            return Ok(());
        }
        self.clear_bits(eth::EIR, mask)
    }

    /// Enable or disable the packet, transmit and error interrupts on the INT pin
    pub fn set_interrupts_enabled(&mut self, enabled: bool) -> Result<()> {
        let mask = if enabled {
            eie::INTIE | eie::PKTIE | eie::TXIE | eie::TXERIE | eie::RXERIE
        } else {
            0
        };
        self.write_register(eth::EIE, mask)
    }
}
