//! Core ENC28J60 driver.
//!
//! This module contains the main [`Enc28j60`] structure and its lifecycle:
//!
//! - Construction (no hardware access)
//! - Reset and initialization
//! - Receive enable/disable
//! - MAC address, clock output and link status
//!
//! The remaining operations are split by concern, each extending [`Enc28j60`]
//! from its own file:
//!
//! | Concern | File |
//! |---------|------|
//! | Control register access, bank switching | `access.rs` |
//! | PHY access over MII | `mii.rs` |
//! | Packet memory | `memory.rs` |
//! | Transmit | `tx.rs` |
//! | Receive | `rx.rs` |
//! | Interrupt flags | [`interrupt`](super::interrupt) |
//! | Self tests | `diagnostics.rs` |

use embedded_hal::delay::DelayNs;

use super::config::{ClockOut, Duplex, Enc28j60Config, State};
use super::error::{ConfigError, IoError, Result};
use crate::hal::bus::BusTransport;
use crate::internal::constants::{MAC_ADDR_LEN, POLL_INTERVAL_US, RESET_SETTLE_US};
use crate::internal::opcode::SYSTEM_RESET;
use crate::internal::phy_regs::{phcon1, phcon2, phstat2, phy_reg};
use crate::internal::register::bits::{econ1, estat, macon1, macon3, macon4};
use crate::internal::register::{Bank, eth, mac};

// =============================================================================
// ENC28J60 Driver
// =============================================================================

/// ENC28J60 driver
///
/// Owns the bus transport and a delay provider. All operations are blocking
/// and take `&mut self`; share the driver between contexts through
/// [`SharedEnc28j60`](crate::sync::SharedEnc28j60) (with the
/// `critical-section` feature) or your own lock.
///
/// # Type Parameters
/// * `B` - Bus transport, usually [`SpiTransport`](crate::hal::SpiTransport)
/// * `D` - Delay provider
///
/// # Example
///
/// ```ignore
/// let bus = SpiTransport::new(spi, cs);
/// let mut enc = Enc28j60::new(bus, delay, Enc28j60Config::new());
/// enc.init()?;
///
/// enc.transmit(&[0xFF; 6], &enc.mac_address(), b"hello")?;
/// let mut frame = [0u8; 1518];
/// if enc.pending_packets()? > 0 {
///     let len = enc.receive(&mut frame)?;
/// }
/// ```
#[derive(Debug)]
pub struct Enc28j60<B, D> {
    pub(crate) bus: B,
    pub(crate) delay: D,
    pub(crate) config: Enc28j60Config,
    pub(crate) state: State,
    /// Bank ECON1 currently selects; `None` when unknown
    pub(crate) active_bank: Option<Bank>,
    /// Address of the next unread receive header
    pub(crate) next_packet: u16,
    pub(crate) rx_started: bool,
}

impl<B, D> Enc28j60<B, D> {
    /// Create a driver without touching the hardware
    ///
    /// Call [`init`](Self::init) before any other operation.
    pub fn new(bus: B, delay: D, config: Enc28j60Config) -> Self {
        Self {
            bus,
            delay,
            next_packet: config.layout.rx_start,
            config,
            state: State::Uninitialized,
            active_bank: None,
            rx_started: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &Enc28j60Config {
        &self.config
    }

    /// Configured MAC address
    pub fn mac_address(&self) -> [u8; MAC_ADDR_LEN] {
        self.config.mac_address
    }

    /// Bank the driver believes ECON1 selects
    pub fn active_bank(&self) -> Option<Bank> {
        self.active_bank
    }

    /// Address of the next receive header
    pub fn next_packet_pointer(&self) -> u16 {
        self.next_packet
    }

    /// Mutable access to the bus transport
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Mutable access to the delay provider
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Give back the bus transport and the delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    // =========================================================================
    // Initialization
    // =========================================================================

    /// Reset and configure the chip, then enable reception
    ///
    /// The configuration is validated before any bus traffic. On success the
    /// driver is [`State::Running`]. Calling `init` again performs a full
    /// reset and discards any pending frames.
    pub fn init(&mut self) -> Result<()> {
        self.config.validate()?;
        self.soft_reset()?;

        let layout = self.config.layout;
        self.write_register_pair(eth::ERXSTL, layout.rx_start)?;
        self.write_register_pair(eth::ERXNDL, layout.rx_end)?;
        self.write_register_pair(eth::ERXRDPTL, layout.rx_start)?;
        self.write_register_pair(eth::ETXSTL, layout.tx_start)?;
        self.write_register_pair(eth::ETXNDL, layout.tx_end)?;
        self.write_register_pair(eth::EWRPTL, layout.tx_start)?;
        self.next_packet = layout.rx_start;
        self.rx_started = false;

        self.write_register(eth::ERXFCON, self.config.rx_filter.to_bits())?;
        self.configure_mac()?;
        self.configure_phy()?;
        let mac_address = self.config.mac_address;
        self.write_mac_address(&mac_address)?;
        self.configure_interrupts()?;

        self.state = State::Stopped;
        self.enable_receive()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ENC28J60 initialized: {} duplex, rx {=u16:#x}..{=u16:#x}, tx {=u16:#x}..{=u16:#x}",
            self.config.duplex,
            layout.rx_start,
            layout.rx_end,
            layout.tx_start,
            layout.tx_end
        );

        Ok(())
    }

    /// Issue the system reset command and wait for the oscillator
    ///
    /// Leaves the driver [`State::Uninitialized`] with bank 0 selected.
    pub fn soft_reset(&mut self) -> Result<()> {
        self.active_bank = None;
        self.state = State::Uninitialized;
        self.command(&SYSTEM_RESET)?;
        self.delay.delay_us(RESET_SETTLE_US);

        let timeout = self.config.clock_ready_timeout_us;
        self.poll_until(timeout, |enc| {
            Ok(enc.read_register(eth::ESTAT)? & estat::CLKRDY != 0)
        })?;

        self.active_bank = Some(Bank::Bank0);
        Ok(())
    }

    fn configure_mac(&mut self) -> Result<()> {
        let full = self.config.duplex == Duplex::Full;
        let gap = self.config.inter_packet_gap;

        let mut con1 = macon1::MARXEN;
        let mut con3 = macon3::PADCFG0 | macon3::TXCRCEN;
        if full {
            con1 |= macon1::TXPAUS | macon1::RXPAUS;
            con3 |= macon3::FULDPX;
        }
        self.write_register(mac::MACON1, con1)?;
        self.write_register(mac::MACON3, con3)?;
        self.write_register(mac::MACON4, macon4::DEFER)?;
        self.write_register_pair(mac::MAMXFLL, self.config.max_frame_length)?;
        self.write_register(mac::MABBIPG, gap.back_to_back)?;
        self.write_register(mac::MAIPGL, gap.non_back_to_back_low)?;
        if !full {
            self.write_register(mac::MAIPGH, gap.non_back_to_back_high)?;
        }
        Ok(())
    }

    fn configure_phy(&mut self) -> Result<()> {
        match self.config.duplex {
            Duplex::Full => self.modify_phy(phy_reg::PHCON1, 0, phcon1::PDPXMD)?,
            Duplex::Half => {
                self.modify_phy(phy_reg::PHCON1, phcon1::PDPXMD, 0)?;
                self.modify_phy(phy_reg::PHCON2, 0, phcon2::HDLDIS)?;
            }
        }
        self.write_phy(phy_reg::PHLCON, self.config.led_config)
    }

    fn configure_interrupts(&mut self) -> Result<()> {
        self.clear_interrupts(super::interrupt::InterruptStatus::all())?;
        self.set_interrupts_enabled(self.config.interrupts)
    }

    // =========================================================================
    // Receive Control
    // =========================================================================

    /// Set ECON1.RXEN; the driver becomes [`State::Running`]
    pub fn enable_receive(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.set_bits(eth::ECON1, econ1::RXEN)?;
        self.state = State::Running;
        Ok(())
    }

    /// Clear ECON1.RXEN; the driver becomes [`State::Stopped`]
    ///
    /// Frames already in the ring stay readable.
    pub fn disable_receive(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.clear_bits(eth::ECON1, econ1::RXEN)?;
        self.state = State::Stopped;
        Ok(())
    }

    // =========================================================================
    // Chip Information
    // =========================================================================

    /// Silicon revision (EREVID)
    pub fn revision(&mut self) -> Result<u8> {
        Ok(self.read_register(eth::EREVID)? & 0x1F)
    }

    /// Configure the CLKOUT pin
    pub fn set_clock_out(&mut self, clock: ClockOut) -> Result<()> {
        self.write_register(eth::ECOCON, clock.to_reg_value())
    }

    /// PHY link status (PHSTAT2.LSTAT)
    pub fn link_up(&mut self) -> Result<bool> {
        Ok(self.read_phy(phy_reg::PHSTAT2)? & phstat2::LSTAT != 0)
    }

    /// Program a new MAC address
    ///
    /// Multicast and all-zero addresses are rejected.
    pub fn set_mac_address(&mut self, addr: &[u8; MAC_ADDR_LEN]) -> Result<()> {
        if addr[0] & 0x01 != 0 || addr.iter().all(|&b| b == 0) {
            return Err(ConfigError::InvalidMacAddress.into());
        }
        self.write_mac_address(addr)?;
        self.config.mac_address = *addr;
        Ok(())
    }

    /// MAC address currently held in MAADR1..MAADR6
    pub fn read_mac_address(&mut self) -> Result<[u8; MAC_ADDR_LEN]> {
        let mut addr = [0u8; MAC_ADDR_LEN];
        for (byte, reg) in addr.iter_mut().zip(mac::MAADR) {
            *byte = self.read_register(reg)?;
        }
        Ok(addr)
    }

    fn write_mac_address(&mut self, addr: &[u8; MAC_ADDR_LEN]) -> Result<()> {
        for (&byte, reg) in addr.iter().zip(mac::MAADR) {
            self.write_register(reg, byte)?;
        }
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        if self.state == State::Uninitialized {
            return Err(IoError::InvalidState.into());
        }
        Ok(())
    }

    /// Poll `done` every [`POLL_INTERVAL_US`] until it returns true
    ///
    /// `done` runs once before any delay. Fails with
    /// [`IoError::Timeout`] once `timeout_us` has elapsed.
    pub(crate) fn poll_until(
        &mut self,
        timeout_us: u32,
        mut done: impl FnMut(&mut Self) -> Result<bool>,
    ) -> Result<()> {
        let mut waited = 0u32;
        loop {
            if done(self)? {
                return Ok(());
            }
            if waited >= timeout_us {
                return Err(IoError::Timeout.into());
            }
            self.delay.delay_us(POLL_INTERVAL_US);
            waited = waited.saturating_add(POLL_INTERVAL_US);
        }
    }
}
