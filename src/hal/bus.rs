//! SPI bus transport
//!
//! The driver needs exactly two things from the bus: a blocking full-duplex
//! exchange of N bytes, and control of the chip-select line. [`BusTransport`]
//! captures that contract; [`SpiTransport`] implements it on top of an
//! `embedded-hal` [`SpiBus`] and a chip-select [`OutputPin`].
//!
//! Chip-select scoping goes through [`BusTransport::transaction`], which
//! always releases the line, so the buffer memory opcode and its payload can
//! share one scope without a caller ever leaving the chip selected.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::driver::error::{BusError, BusResult};

/// Scratch size used by the default `read`/`write` implementations
pub const TRANSFER_CHUNK: usize = 32;

// =============================================================================
// Bus Transport Trait
// =============================================================================

/// Byte transport to the ENC28J60
///
/// Implementations only move bytes and drive chip select; all protocol
/// knowledge lives in the driver.
pub trait BusTransport {
    /// Exchange bytes: clock out `tx` while clocking `rx.len()` bytes in
    ///
    /// `tx` and `rx` are expected to have the same length.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult<()>;

    /// Assert chip select (drive CS low)
    fn select(&mut self) -> BusResult<()>;

    /// Deassert chip select (drive CS high)
    fn deselect(&mut self) -> BusResult<()>;

    /// Clock out `tx`, discarding what comes back
    fn write(&mut self, tx: &[u8]) -> BusResult<()> {
        let mut sink = [0u8; TRANSFER_CHUNK];
        for chunk in tx.chunks(TRANSFER_CHUNK) {
            self.transfer(chunk, &mut sink[..chunk.len()])?;
        }
        Ok(())
    }

    /// Clock in `rx.len()` bytes while sending zeros
    fn read(&mut self, rx: &mut [u8]) -> BusResult<()> {
        let fill = [0u8; TRANSFER_CHUNK];
        for chunk in rx.chunks_mut(TRANSFER_CHUNK) {
            let len = chunk.len();
            self.transfer(&fill[..len], chunk)?;
        }
        Ok(())
    }

    /// Run `f` with chip select asserted
    ///
    /// Chip select is released whether or not `f` succeeds. An error from
    /// `f` takes precedence over an error releasing the line.
    fn transaction<R>(&mut self, f: impl FnOnce(&mut Self) -> BusResult<R>) -> BusResult<R>
    where
        Self: Sized,
    {
        self.select()?;
        let result = f(self);
        let released = self.deselect();
        let value = result?;
        released?;
        Ok(value)
    }
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult<()> {
        (**self).transfer(tx, rx)
    }

    fn select(&mut self) -> BusResult<()> {
        (**self).select()
    }

    fn deselect(&mut self) -> BusResult<()> {
        (**self).deselect()
    }

    fn write(&mut self, tx: &[u8]) -> BusResult<()> {
        (**self).write(tx)
    }

    fn read(&mut self, rx: &mut [u8]) -> BusResult<()> {
        (**self).read(rx)
    }
}

// =============================================================================
// embedded-hal SPI Transport
// =============================================================================

/// [`BusTransport`] over an `embedded-hal` SPI bus and a GPIO chip select
///
/// The bus must be configured for SPI mode 0 at no more than 20 MHz. The
/// chip-select pin should start high.
#[derive(Debug)]
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiTransport<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Wrap a SPI bus and its chip-select pin
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Mutable access to the SPI bus
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Give back the bus and the pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> BusTransport for SpiTransport<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult<()> {
        self.spi.transfer(rx, tx).map_err(|_| BusError::Transfer)?;
        self.spi.flush().map_err(|_| BusError::Transfer)
    }

    fn select(&mut self) -> BusResult<()> {
        self.cs.set_low().map_err(|_| BusError::ChipSelect)
    }

    fn deselect(&mut self) -> BusResult<()> {
        // Clocks must be finished before CS rises
        let flushed = self.spi.flush().map_err(|_| BusError::Transfer);
        self.cs.set_high().map_err(|_| BusError::ChipSelect)?;
        flushed
    }

    fn write(&mut self, tx: &[u8]) -> BusResult<()> {
        self.spi.write(tx).map_err(|_| BusError::Transfer)?;
        self.spi.flush().map_err(|_| BusError::Transfer)
    }

    fn read(&mut self, rx: &mut [u8]) -> BusResult<()> {
        self.spi.read(rx).map_err(|_| BusError::Transfer)?;
        self.spi.flush().map_err(|_| BusError::Transfer)
    }
}
