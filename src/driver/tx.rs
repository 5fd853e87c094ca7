//! Frame transmission.
//!
//! A frame is staged in the transmit region as
//!
//! ```text
//! tx_start      control byte (0x00)
//! tx_start + 1  destination | source | length/type | payload
//! ETXND         last frame byte
//! ETXND + 1     7-byte transmit status vector (written by the chip)
//! ```
//!
//! and sent by setting ECON1.TXRTS. The chip pads short frames and appends
//! the CRC (MACON3.PADCFG0 | TXCRCEN).

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::{IoError, Result};
use crate::frame::{TX_CONTROL_DEFAULT, TxPrefix};
use crate::hal::bus::BusTransport;
use crate::internal::constants::{
    CRC_SIZE, ETH_HEADER_SIZE, MAC_ADDR_LEN, TX_CONTROL_BYTE_SIZE, TX_STATUS_VECTOR_SIZE,
};
use crate::internal::register::bits::{econ1, eie, eir, estat};
use crate::internal::register::eth;

/// Outcome of the last transmission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitStatus {
    /// ECON1.TXRTS still set
    Pending,
    /// Frame left the MAC
    Complete,
}

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    /// Send `payload` with an Ethernet header built from the arguments
    ///
    /// The length/type field carries the payload length in network byte
    /// order. Returns once the frame is handed to the MAC; use
    /// [`wait_transmit`](Self::wait_transmit) or
    /// [`transmit_status`](Self::transmit_status) for the outcome.
    pub fn transmit(
        &mut self,
        destination: &[u8; MAC_ADDR_LEN],
        source: &[u8; MAC_ADDR_LEN],
        payload: &[u8],
    ) -> Result<()> {
        let length = u16::try_from(payload.len()).map_err(|_| IoError::FrameTooLarge)?;
        let prefix = TxPrefix::new(destination, source, length);
        self.send(prefix.as_bytes(), payload)
    }

    /// Send a complete Ethernet frame (header included, CRC excluded)
    pub fn transmit_frame(&mut self, frame: &[u8]) -> Result<()> {
        if frame.len() < ETH_HEADER_SIZE {
            return Err(IoError::BufferTooSmall.into());
        }
        self.send(&[TX_CONTROL_DEFAULT], frame)
    }

    /// `prefix` starts with the control byte; `frame_len` counts everything after it
    fn send(&mut self, prefix: &[u8], body: &[u8]) -> Result<()> {
        self.ensure_initialized()?;

        let frame_len = prefix.len() - TX_CONTROL_BYTE_SIZE + body.len();
        let layout = self.config.layout;
        let fits_mac = frame_len + CRC_SIZE <= self.config.max_frame_length as usize;
        let fits_region =
            TX_CONTROL_BYTE_SIZE + frame_len + TX_STATUS_VECTOR_SIZE <= layout.tx_size() as usize;
        if !fits_mac || !fits_region {
            return Err(IoError::FrameTooLarge.into());
        }

        // The previous frame must be out before its buffer is reused
        let timeout = self.config.tx_timeout_us;
        self.poll_until(timeout, |enc| {
            Ok(enc.read_register(eth::ECON1)? & econ1::TXRTS == 0)
        })?;

        if self.config.tx_reset_workaround {
            self.set_bits(eth::ECON1, econ1::TXRST)?;
            self.clear_bits(eth::ECON1, econ1::TXRST)?;
        }
        self.clear_bits(eth::ESTAT, estat::TXABRT)?;

        self.write_register_pair(eth::ETXSTL, layout.tx_start)?;
        self.write_buffer_memory_gather(layout.tx_start, &[prefix, body])?;
        self.write_register_pair(eth::ETXNDL, layout.tx_start + frame_len as u16)?;

        self.clear_bits(eth::EIR, eir::TXIF | eir::TXERIF)?;
        if self.config.interrupts {
            self.set_bits(eth::EIE, eie::TXIE | eie::INTIE)?;
        }
        self.set_bits(eth::ECON1, econ1::TXRTS)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("TX: {} byte frame queued", frame_len);

        Ok(())
    }

    /// State of the last transmission
    ///
    /// Fails with [`IoError::TransmitAborted`] when the chip gave up on the
    /// frame (ESTAT.TXABRT).
    pub fn transmit_status(&mut self) -> Result<TransmitStatus> {
        if self.read_register(eth::ECON1)? & econ1::TXRTS != 0 {
            return Ok(TransmitStatus::Pending);
        }
        if self.read_register(eth::ESTAT)? & estat::TXABRT != 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("TX: transmission aborted");
            return Err(IoError::TransmitAborted.into());
        }
        Ok(TransmitStatus::Complete)
    }

    /// Wait for the last transmission to finish
    pub fn wait_transmit(&mut self) -> Result<()> {
        let timeout = self.config.tx_timeout_us;
        self.poll_until(timeout, |enc| {
            Ok(enc.transmit_status()? == TransmitStatus::Complete)
        })
    }
}
