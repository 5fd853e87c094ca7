//! PHY register access through the MII management interface.
//!
//! PHY registers are 16 bits wide and never addressed directly: the address
//! goes to MIREGADR, writes go through MIWRL/MIWRH and reads come back in
//! MIRDL/MIRDH. Every wait on MISTAT.BUSY is bounded by
//! [`Enc28j60Config::mii_timeout_us`](super::config::Enc28j60Config::mii_timeout_us).

use embedded_hal::delay::DelayNs;

use super::enc28j60::Enc28j60;
use super::error::Result;
use crate::hal::bus::BusTransport;
use crate::internal::constants::MII_READ_SETTLE_US;
use crate::internal::register::bits::{micmd, mistat};
use crate::internal::register::mii;

/// PHY register address mask
const PHY_ADDRESS_MASK: u8 = 0x1F;

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    /// Read a PHY register
    ///
    /// MICMD.MIIRD is cleared again even when the busy wait times out.
    pub fn read_phy(&mut self, reg: u8) -> Result<u16> {
        self.write_register(mii::MIREGADR, reg & PHY_ADDRESS_MASK)?;
        let base = self.read_register(mii::MICMD)? & micmd::MIISCAN;
        self.write_register(mii::MICMD, base | micmd::MIIRD)?;
        self.delay.delay_us(MII_READ_SETTLE_US);

        let waited = self.wait_mii_idle();
        let cleared = self.write_register(mii::MICMD, base);
        waited?;
        cleared?;

        let lo = self.read_register(mii::MIRDL)?;
        let hi = self.read_register(mii::MIRDH)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Write a PHY register and wait for the MII cycle to finish
    pub fn write_phy(&mut self, reg: u8, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        self.write_register(mii::MIREGADR, reg & PHY_ADDRESS_MASK)?;
        self.write_register(mii::MIWRL, lo)?;
        // Writing the high byte starts the cycle
        self.write_register(mii::MIWRH, hi)?;
        self.wait_mii_idle()
    }

    /// Read-modify-write a PHY register
    pub fn modify_phy(&mut self, reg: u8, clear: u16, set: u16) -> Result<()> {
        let value = self.read_phy(reg)?;
        self.write_phy(reg, (value & !clear) | set)
    }

    fn wait_mii_idle(&mut self) -> Result<()> {
        let timeout = self.config.mii_timeout_us;
        self.poll_until(timeout, |enc| {
            Ok(enc.read_register(mii::MISTAT)? & mistat::BUSY == 0)
        })
    }
}
