//! Register and packet memory self tests.
//!
//! These are bring-up aids: they exercise the SPI path and the chip's
//! storage, not the network. The buffer test overwrites receive ring
//! contents, so run it with reception disabled.

use core::ops::Range;

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::{ConfigError, IoError, RegisterError, Result};
use crate::hal::bus::BusTransport;
use crate::internal::phy_regs::{PHY_ID1, PHY_ID2, PHY_ID2_MASK, phy_reg};
use crate::internal::register::{Bank, COMMON_REGISTER_START, Register};

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    /// Write `pattern` to each register in `addresses` of `bank` and read it back
    ///
    /// Every register gets its original value back, even after a mismatch.
    /// Common registers (0x1B-0x1F) are refused since they include ECON1.
    pub fn self_test_registers(
        &mut self,
        bank: Bank,
        addresses: Range<u8>,
        pattern: u8,
    ) -> Result<()> {
        for address in addresses {
            if address >= COMMON_REGISTER_START {
                return Err(RegisterError::InvalidRegister.into());
            }
            let reg = Register::at(bank, address)?;
            let saved = self.read_register(reg)?;
            let outcome = self.check_register(reg, pattern);
            let restored = self.check_register(reg, saved);
            outcome?;
            restored?;
        }
        Ok(())
    }

    fn check_register(&mut self, reg: Register, expected: u8) -> Result<()> {
        self.write_register(reg, expected)?;
        if self.read_register(reg)? != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!("self test: register {=u8:#x} mismatch", reg.id());
            return Err(RegisterError::TestMismatch.into());
        }
        Ok(())
    }

    /// Write `pattern` into the receive ring at `address` and read it back into `scratch`
    pub fn self_test_buffer(
        &mut self,
        address: u16,
        pattern: &[u8],
        scratch: &mut [u8],
    ) -> Result<()> {
        if !self.config.layout.contains_rx(address) {
            return Err(ConfigError::InvalidRxRegion.into());
        }
        let readback = scratch
            .get_mut(..pattern.len())
            .ok_or(IoError::BufferTooSmall)?;

        self.write_ring(address, pattern)?;
        self.read_ring(address, readback)?;
        if readback != pattern {
            return Err(RegisterError::TestMismatch.into());
        }
        Ok(())
    }

    /// Check EREVID against `expected`, returning the revision read
    pub fn verify_revision(&mut self, expected: u8) -> Result<u8> {
        let revision = self.revision()?;
        if revision != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!("unexpected revision {=u8:#x}", revision);
            return Err(RegisterError::TestMismatch.into());
        }
        Ok(revision)
    }

    /// Check the PHY identifier registers
    pub fn verify_phy_id(&mut self) -> Result<()> {
        let id1 = self.read_phy(phy_reg::PHID1)?;
        let id2 = self.read_phy(phy_reg::PHID2)?;
        if id1 != PHY_ID1 || id2 & PHY_ID2_MASK != PHY_ID2 {
            return Err(RegisterError::TestMismatch.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::Enc28j60Config;
    use crate::driver::error::Error;
    use crate::internal::constants::EXPECTED_REVISION;
    use crate::internal::register::eth;
    use crate::test_utils::ready_driver;

    // =========================================================================
    // Register Test
    // =========================================================================

    #[test]
    fn register_test_passes_and_restores() {
        let mut enc = ready_driver(Enc28j60Config::new());
        enc.bus_mut().set_register(eth::EDMASTL, 0x5A);

        enc.self_test_registers(Bank::Bank0, 0x10..0x18, 3).unwrap();
        assert_eq!(enc.bus_mut().register(eth::EDMASTL), 0x5A);
        assert_eq!(enc.bus_mut().register(eth::EDMACSH), 0x00);
    }

    #[test]
    fn read_only_register_mismatches() {
        let mut enc = ready_driver(Enc28j60Config::new());
        assert_eq!(
            enc.self_test_registers(Bank::Bank1, 0x19..0x1A, 0x55),
            Err(Error::Register(RegisterError::TestMismatch))
        );
    }

    #[test]
    fn common_registers_refused() {
        let mut enc = ready_driver(Enc28j60Config::new());
        assert_eq!(
            enc.self_test_registers(Bank::Bank0, 0x1A..0x1C, 0),
            Err(Error::Register(RegisterError::InvalidRegister))
        );
    }

    // =========================================================================
    // Buffer Test
    // =========================================================================

    #[test]
    fn buffer_test_across_wrap() {
        let mut enc = ready_driver(Enc28j60Config::new());
        enc.disable_receive().unwrap();
        let pattern = [0xA5u8; 54];
        let mut scratch = [0u8; 64];

        enc.self_test_buffer(0x0BFE, &pattern, &mut scratch).unwrap();
        enc.self_test_buffer(0x0101, &pattern[..1], &mut scratch).unwrap();
        assert_eq!(enc.bus_mut().memory(0x0000, 52), &pattern[2..]);
    }

    #[test]
    fn buffer_test_argument_errors() {
        let mut enc = ready_driver(Enc28j60Config::new());
        let mut scratch = [0u8; 4];
        assert_eq!(
            enc.self_test_buffer(0x0000, &[0u8; 8], &mut scratch),
            Err(Error::Io(IoError::BufferTooSmall))
        );
        assert_eq!(
            enc.self_test_buffer(0x0C00, &[0u8; 2], &mut scratch),
            Err(Error::Config(ConfigError::InvalidRxRegion))
        );
    }

    // =========================================================================
    // Identification
    // =========================================================================

    #[test]
    fn revision_and_phy_identity() {
        let mut enc = ready_driver(Enc28j60Config::new());
        assert_eq!(enc.verify_revision(EXPECTED_REVISION).unwrap(), 0x06);
        assert_eq!(
            enc.verify_revision(0x05),
            Err(Error::Register(RegisterError::TestMismatch))
        );
        enc.verify_phy_id().unwrap();

        enc.bus_mut().set_phy_register(phy_reg::PHID1, 0xFFFF);
        assert_eq!(enc.verify_phy_id(), Err(Error::Register(RegisterError::TestMismatch)));
    }
}
