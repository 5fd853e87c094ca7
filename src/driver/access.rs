//! Control register access and bank switching.
//!
//! Every register operation first makes sure ECON1 selects the register's
//! bank. The driver caches the selected bank and only switches when needed;
//! common registers (0x1B-0x1F) never switch. A failed bank switch leaves the
//! cache empty so the next access reselects.

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::{Error, RegisterError, Result};
use crate::hal::bus::BusTransport;
use crate::internal::opcode;
use crate::internal::register::bits::econ1;
use crate::internal::register::{Bank, Register, eth};

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    // =========================================================================
    // Raw Transactions
    // =========================================================================

    /// One chip-select scope: exchange `tx` for `rx`
    pub(crate) fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        let result = self.bus.transaction(|bus| bus.transfer(tx, rx));
        self.settle();
        result.map_err(Error::from)
    }

    /// One chip-select scope: send `tx`, ignore what comes back
    pub(crate) fn command(&mut self, tx: &[u8]) -> Result<()> {
        let result = self.bus.transaction(|bus| bus.write(tx));
        self.settle();
        result.map_err(Error::from)
    }

    /// CS idle time between transactions
    pub(crate) fn settle(&mut self) {
        if self.config.settle_ns > 0 {
            self.delay.delay_ns(self.config.settle_ns);
        }
    }

    // =========================================================================
    // Bank Selection
    // =========================================================================

    /// Select `bank` in ECON1 unconditionally
    ///
    /// Clears both bank bits, then sets the ones `bank` needs. Bank 0 takes a
    /// single clear.
    pub fn select_bank(&mut self, bank: Bank) -> Result<()> {
        self.active_bank = None;
        let econ1_addr = eth::ECON1.address();
        self.command(&opcode::bit_field_clear(econ1_addr, econ1::BSEL))?;
        if bank != Bank::Bank0 {
            self.command(&opcode::bit_field_set(econ1_addr, bank.bits()))?;
        }
        self.active_bank = Some(bank);
        Ok(())
    }

    fn ensure_bank(&mut self, reg: Register) -> Result<()> {
        if reg.is_common() || self.active_bank == Some(reg.bank()) {
            return Ok(());
        }
        self.select_bank(reg.bank())
    }

    // =========================================================================
    // Register Access
    // =========================================================================

    /// Read a control register
    ///
    /// MAC and MII registers are read with the extra dummy byte.
    pub fn read_register(&mut self, reg: Register) -> Result<u8> {
        self.ensure_bank(reg)?;
        if reg.needs_dummy_byte() {
            let mut rx = [0u8; 3];
            self.exchange(&opcode::read_control_delayed(reg.address()), &mut rx)?;
            Ok(rx[2])
        } else {
            let mut rx = [0u8; 2];
            self.exchange(&opcode::read_control(reg.address()), &mut rx)?;
            Ok(rx[1])
        }
    }

    /// Write a control register
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.ensure_bank(reg)?;
        if reg == eth::ECON1 {
            self.active_bank = None;
        }
        self.command(&opcode::write_control(reg.address(), value))?;
        if reg == eth::ECON1 {
            self.active_bank = Some(Bank::from_bits(value));
        }
        Ok(())
    }

    /// OR `mask` into an ETH register
    pub fn set_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        self.bit_field(reg, mask, true)
    }

    /// Clear `mask` in an ETH register
    pub fn clear_bits(&mut self, reg: Register, mask: u8) -> Result<()> {
        self.bit_field(reg, mask, false)
    }

    fn bit_field(&mut self, reg: Register, mask: u8, set: bool) -> Result<()> {
        if reg.needs_dummy_byte() {
            return Err(RegisterError::BitFieldUnsupported.into());
        }
        self.ensure_bank(reg)?;
        let tx = if set {
            opcode::bit_field_set(reg.address(), mask)
        } else {
            opcode::bit_field_clear(reg.address(), mask)
        };
        if reg == eth::ECON1 && mask & econ1::BSEL != 0 {
            self.active_bank = None;
        }
        self.command(&tx)
    }

    /// Read a low/high register pair, low byte first
    pub fn read_register_pair(&mut self, low: Register) -> Result<u16> {
        let lo = self.read_register(low)?;
        let hi = self.read_register(low.next())?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Write a low/high register pair, low byte first
    pub fn write_register_pair(&mut self, low: Register, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        self.write_register(low, lo)?;
        self.write_register(low.next(), hi)
    }
}
