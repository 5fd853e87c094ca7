//! Packet memory access.
//!
//! Buffer memory is streamed through one chip-select scope per operation:
//! the RBM/WBM opcode followed by the payload, with ECON2.AUTOINC advancing
//! the pointer. Reads of the receive ring are split at `rx_end` so callers
//! can read across the wrap.

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::{Error, Result};
use crate::hal::bus::BusTransport;
use crate::internal::constants::BUFFER_MEMORY_END;
use crate::internal::opcode::{READ_BUFFER_MEMORY, WRITE_BUFFER_MEMORY};
use crate::internal::register::bits::econ2;
use crate::internal::register::eth;

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    /// Write `data` to packet memory starting at `address`
    pub fn write_buffer_memory(&mut self, address: u16, data: &[u8]) -> Result<()> {
        self.write_buffer_memory_gather(address, &[data])
    }

    /// Write several slices back to back in one buffer memory transaction
    pub(crate) fn write_buffer_memory_gather(
        &mut self,
        address: u16,
        parts: &[&[u8]],
    ) -> Result<()> {
        if parts.iter().all(|part| part.is_empty()) {
            return Ok(());
        }
        self.set_bits(eth::ECON2, econ2::AUTOINC)?;
        self.write_register_pair(eth::EWRPTL, address & BUFFER_MEMORY_END)?;

        let written = self.bus.transaction(|bus| {
            bus.write(&[WRITE_BUFFER_MEMORY])?;
            for part in parts {
                bus.write(part)?;
            }
            Ok(())
        });
        self.settle();
        written.map_err(Error::from)?;

        self.clear_bits(eth::ECON2, econ2::AUTOINC)
    }

    /// Read `dest.len()` bytes of packet memory starting at `address`
    ///
    /// Reads past ERXND wrap to ERXST in hardware.
    pub fn read_buffer_memory(&mut self, address: u16, dest: &mut [u8]) -> Result<()> {
        if dest.is_empty() {
            return Ok(());
        }
        self.set_bits(eth::ECON2, econ2::AUTOINC)?;
        self.write_register_pair(eth::ERDPTL, address & BUFFER_MEMORY_END)?;

        let read = self.bus.transaction(|bus| {
            bus.write(&[READ_BUFFER_MEMORY])?;
            bus.read(dest)
        });
        self.settle();
        read.map_err(Error::from)?;

        self.clear_bits(eth::ECON2, econ2::AUTOINC)
    }

    /// Read from the receive ring, continuing at `rx_start` after `rx_end`
    pub(crate) fn read_ring(&mut self, address: u16, dest: &mut [u8]) -> Result<()> {
        let layout = self.config.layout;
        let first = dest.len().min(layout.bytes_until_wrap(address));
        let (head, mut rest) = dest.split_at_mut(first);
        self.read_buffer_memory(address, head)?;

        while !rest.is_empty() {
            let len = rest.len().min(layout.rx_size() as usize);
            let (chunk, tail) = core::mem::take(&mut rest).split_at_mut(len);
            self.read_buffer_memory(layout.rx_start, chunk)?;
            rest = tail;
        }
        Ok(())
    }

    /// Write into the receive ring, continuing at `rx_start` after `rx_end`
    pub(crate) fn write_ring(&mut self, address: u16, data: &[u8]) -> Result<()> {
        let layout = self.config.layout;
        let first = data.len().min(layout.bytes_until_wrap(address));
        let (head, mut rest) = data.split_at(first);
        self.write_buffer_memory(address, head)?;

        while !rest.is_empty() {
            let len = rest.len().min(layout.rx_size() as usize);
            let (chunk, tail) = rest.split_at(len);
            self.write_buffer_memory(layout.rx_start, chunk)?;
            rest = tail;
        }
        Ok(())
    }
}
