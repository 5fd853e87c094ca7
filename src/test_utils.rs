//! Testing utilities and mock implementations
//!
//! This module provides a byte-level ENC28J60 emulator and a mock delay so
//! the driver can be exercised on the host without hardware.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::vec;
use std::vec::Vec;

use crate::driver::config::Enc28j60Config;
use crate::driver::enc28j60::Enc28j60;
use crate::driver::error::{BusError, BusResult};
use crate::hal::bus::BusTransport;
use crate::internal::opcode::{Opcode, READ_BUFFER_MEMORY, WRITE_BUFFER_MEMORY};
use crate::internal::phy_regs::{PHY_ID1, PHY_ID2, phstat2, phy_reg};
use crate::internal::register::bits::{econ1, econ2, eir, estat, micmd, mistat};
use crate::internal::register::{Register, eth, mac, mii};

/// Byte the emulator returns in the dummy slot of a MAC/MII read
pub const DUMMY_BYTE: u8 = 0xA5;

const MEMORY_SIZE: usize = 0x2000;

// =============================================================================
// Mock ENC28J60
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Instruction,
    ReadControl(u8),
    WriteControl(u8),
    BitSet(u8),
    BitClear(u8),
    ReadBuffer,
    WriteBuffer,
    Ignored,
}

/// Byte-level ENC28J60 emulator implementing [`BusTransport`]
///
/// Models the parts of the chip the driver relies on: banked control
/// registers with shared common registers, the dummy byte of MAC/MII reads,
/// bit-field operations on ETH registers, buffer memory with auto-increment
/// (reads wrap at ERXND, writes wrap at 0x1FFF), the MII engine with a
/// configurable busy period, the packet counter, transmit capture and
/// receive frame injection.
///
/// # Example
///
/// ```ignore
/// let mut chip = MockEnc28j60::new();
/// chip.inject_rx_frame(&frame);
/// let mut enc = Enc28j60::new(chip, MockDelay::new(), Enc28j60Config::new());
/// ```
#[derive(Debug)]
pub struct MockEnc28j60 {
    /// Control registers; common registers live in bank 0's slots
    banks: [[u8; 32]; 4],
    memory: Vec<u8>,
    phy: [u16; 32],
    phy_masks: [u16; 32],
    selected: bool,
    scope: Scope,
    current: Vec<u8>,
    transactions: Vec<Vec<u8>>,
    transmitted: Vec<Vec<u8>>,
    transfers: usize,
    mii_busy_remaining: u32,
    /// MISTAT reads that report BUSY after each MII operation
    pub mii_busy_polls: u32,
    /// MISTAT.BUSY never clears
    pub mii_stuck: bool,
    /// ECON1.TXRTS never clears
    pub hold_txrts: bool,
    /// Abort the next transmission
    pub abort_next_tx: bool,
    /// ESTAT.CLKRDY never sets
    pub clock_never_ready: bool,
    fail_after: Option<usize>,
    fail_select: bool,
    link_up: bool,
}

impl Default for MockEnc28j60 {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnc28j60 {
    /// Create an emulator in its power-on state
    pub fn new() -> Self {
        let mut chip = Self {
            banks: [[0; 32]; 4],
            memory: vec![0; MEMORY_SIZE],
            phy: [0; 32],
            phy_masks: [0xFFFF; 32],
            selected: false,
            scope: Scope::Instruction,
            current: Vec::new(),
            transactions: Vec::new(),
            transmitted: Vec::new(),
            transfers: 0,
            mii_busy_remaining: 0,
            mii_busy_polls: 2,
            mii_stuck: false,
            hold_txrts: false,
            abort_next_tx: false,
            clock_never_ready: false,
            fail_after: None,
            fail_select: false,
            link_up: false,
        };
        chip.reset();
        chip
    }

    // =========================================================================
    // Inspection and Setup
    // =========================================================================

    /// Current value of a control register
    pub fn register(&self, reg: Register) -> u8 {
        let (bank, addr) = Self::slot(reg.bank().bits() as usize, reg.address());
        self.banks[bank][addr]
    }

    /// Store a register value without side effects
    pub fn set_register(&mut self, reg: Register, value: u8) {
        let (bank, addr) = Self::slot(reg.bank().bits() as usize, reg.address());
        self.banks[bank][addr] = value;
    }

    /// 16-bit value of a low/high register pair
    pub fn register_pair(&self, low: Register) -> u16 {
        u16::from_le_bytes([self.register(low), self.register(low.next())])
    }

    /// Store a register pair without side effects
    pub fn set_register_pair(&mut self, low: Register, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.set_register(low, lo);
        self.set_register(low.next(), hi);
    }

    /// Packet memory contents
    pub fn memory(&self, address: u16, len: usize) -> &[u8] {
        let start = address as usize;
        &self.memory[start..start + len]
    }

    /// Overwrite packet memory
    pub fn load_memory(&mut self, address: u16, data: &[u8]) {
        let start = address as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }

    /// Current PHY register value
    pub fn phy_register(&self, reg: u8) -> u16 {
        self.phy[reg as usize & 0x1F]
    }

    /// Store a PHY register without side effects
    pub fn set_phy_register(&mut self, reg: u8, value: u16) {
        self.phy[reg as usize & 0x1F] = value;
    }

    /// Restrict the writable bits of a PHY register
    pub fn set_phy_mask(&mut self, reg: u8, mask: u16) {
        self.phy_masks[reg as usize & 0x1F] = mask;
    }

    /// Drive PHSTAT2.LSTAT
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
        self.apply_link();
    }

    /// Fail every transfer after `count` successful ones
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count.saturating_add(self.transfers));
    }

    /// Fail the next chip-select assertion
    pub fn fail_select(&mut self, fail: bool) {
        self.fail_select = fail;
    }

    /// Bytes sent in each chip-select scope, oldest first
    pub fn transactions(&self) -> &[Vec<u8>] {
        &self.transactions
    }

    /// Forget recorded transactions
    pub fn clear_log(&mut self) {
        self.transactions.clear();
    }

    /// Frames handed to the MAC, control byte excluded
    pub fn transmitted(&self) -> &[Vec<u8>] {
        &self.transmitted
    }

    /// True while chip select is asserted
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Active bank according to ECON1
    pub fn bank(&self) -> u8 {
        self.banks[0][0x1F] & econ1::BSEL
    }

    // =========================================================================
    // Receive Injection
    // =========================================================================

    /// Place a good frame (CRC appended) in the receive ring
    ///
    /// Returns the address of the frame's status header.
    pub fn inject_rx_frame(&mut self, frame: &[u8]) -> u16 {
        self.inject_rx_frame_with_status(frame, true)
    }

    /// Place a frame in the receive ring with the given "received OK" bit
    pub fn inject_rx_frame_with_status(&mut self, frame: &[u8], ok: bool) -> u16 {
        let rx_start = self.register_pair(eth::ERXSTL);
        let rx_end = self.register_pair(eth::ERXNDL);
        let write_ptr = self.register_pair(eth::ERXWRPTL);
        let size = (rx_end - rx_start) as usize + 1;

        let byte_count = frame.len() + 4;
        let used = (6 + byte_count + 1) & !1;
        let relative = (write_ptr - rx_start) as usize + used;
        let next = rx_start + (relative % size) as u16;

        let status: u16 = if ok { 1 << 7 } else { 1 << 4 };
        let mut bytes = Vec::with_capacity(6 + byte_count);
        bytes.extend_from_slice(&next.to_le_bytes());
        bytes.extend_from_slice(&(byte_count as u16).to_le_bytes());
        bytes.extend_from_slice(&status.to_le_bytes());
        bytes.extend_from_slice(frame);
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let mut addr = write_ptr;
        for b in bytes {
            self.memory[addr as usize] = b;
            addr = if addr == rx_end { rx_start } else { addr + 1 };
        }

        self.set_register_pair(eth::ERXWRPTL, next);
        let count = self.register(eth::EPKTCNT).saturating_add(1);
        self.set_register(eth::EPKTCNT, count);
        self.banks[0][0x1C] |= eir::PKTIF;
        write_ptr
    }

    // =========================================================================
    // Chip Model
    // =========================================================================

    fn slot(bank: usize, addr: u8) -> (usize, usize) {
        let addr = (addr & 0x1F) as usize;
        if addr >= 0x1B { (0, addr) } else { (bank & 0x03, addr) }
    }

    fn is_delayed(bank: u8, addr: u8) -> bool {
        match bank {
            2 => addr < 0x1B,
            3 => addr <= 0x05 || addr == 0x0A,
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.banks = [[0; 32]; 4];
        self.set_register(eth::ECON2, econ2::AUTOINC);
        self.set_register(eth::ESTAT, estat::CLKRDY);
        self.set_register_pair(eth::ERDPTL, 0x05FA);
        self.set_register_pair(eth::ERXSTL, 0x05FA);
        self.set_register_pair(eth::ERXNDL, 0x1FFF);
        self.set_register_pair(eth::ERXRDPTL, 0x05FA);
        self.set_register(eth::ERXFCON, 0xA1);
        self.set_register_pair(mac::MAMXFLL, 0x0600);
        self.set_register(eth::EREVID, 0x06);
        self.set_register(eth::ECOCON, 0x04);

        self.phy = [0; 32];
        self.phy[phy_reg::PHID1 as usize] = PHY_ID1;
        self.phy[phy_reg::PHID2 as usize] = PHY_ID2 | 0x05;
        self.phy[phy_reg::PHLCON as usize] = 0x3422;
        self.apply_link();
        self.mii_busy_remaining = 0;
    }

    fn apply_link(&mut self) {
        let reg = phy_reg::PHSTAT2 as usize;
        if self.link_up {
            self.phy[reg] |= phstat2::LSTAT;
        } else {
            self.phy[reg] &= !phstat2::LSTAT;
        }
    }

    fn read_reg(&mut self, addr: u8) -> u8 {
        let bank = self.bank();
        let (b, a) = Self::slot(bank as usize, addr);
        match (b, a) {
            (_, 0x1D) if self.clock_never_ready => self.banks[0][0x1D] & !estat::CLKRDY,
            (3, 0x0A) => {
                if self.mii_stuck {
                    mistat::BUSY
                } else if self.mii_busy_remaining > 0 {
                    self.mii_busy_remaining -= 1;
                    mistat::BUSY
                } else {
                    0
                }
            }
            _ => self.banks[b][a],
        }
    }

    fn write_reg(&mut self, addr: u8, value: u8) {
        let bank = self.bank();
        let (b, a) = Self::slot(bank as usize, addr);
        let previous = self.banks[b][a];
        match (b, a) {
            // Read-only
            (0, 0x0E | 0x0F) | (1, 0x19) | (3, 0x12) => {}
            (0, 0x1E) => {
                if value & econ2::PKTDEC != 0 {
                    let count = self.banks[1][0x19].saturating_sub(1);
                    self.banks[1][0x19] = count;
                    if count == 0 {
                        self.banks[0][0x1C] &= !eir::PKTIF;
                    }
                }
                self.banks[0][0x1E] = value & !econ2::PKTDEC;
            }
            (0, 0x1F) => {
                self.banks[0][0x1F] = value;
                if value & econ1::TXRTS != 0 && previous & econ1::TXRTS == 0 {
                    self.start_transmit();
                }
            }
            (0, 0x08 | 0x09) => {
                self.banks[0][a] = value;
                // Programming ERXST moves the write pointer with it
                self.banks[0][0x0E] = self.banks[0][0x08];
                self.banks[0][0x0F] = self.banks[0][0x09];
            }
            (2, 0x17) => {
                self.banks[2][0x17] = value;
                let reg = (self.banks[2][0x14] & 0x1F) as usize;
                let data = u16::from_le_bytes([self.banks[2][0x16], value]);
                self.phy[reg] = data & self.phy_masks[reg];
                self.mii_busy_remaining = self.mii_busy_polls;
            }
            (2, 0x12) => {
                self.banks[2][0x12] = value;
                if value & micmd::MIIRD != 0 && previous & micmd::MIIRD == 0 {
                    let reg = (self.banks[2][0x14] & 0x1F) as usize;
                    let [lo, hi] = self.phy[reg].to_le_bytes();
                    self.banks[2][0x18] = lo;
                    self.banks[2][0x19] = hi;
                    self.mii_busy_remaining = self.mii_busy_polls;
                }
            }
            _ => self.banks[b][a] = value,
        }
    }

    fn start_transmit(&mut self) {
        let start = self.register_pair(eth::ETXSTL) as usize;
        let end = self.register_pair(eth::ETXNDL) as usize;
        let frame = if end > start {
            self.memory[start + 1..=end].to_vec()
        } else {
            Vec::new()
        };
        self.transmitted.push(frame);

        if self.abort_next_tx {
            self.abort_next_tx = false;
            self.banks[0][0x1D] |= estat::TXABRT;
            self.banks[0][0x1C] |= eir::TXERIF;
        } else {
            self.banks[0][0x1C] |= eir::TXIF;
        }
        if !self.hold_txrts {
            self.banks[0][0x1F] &= !econ1::TXRTS;
        }
    }

    fn autoinc(&self) -> bool {
        self.banks[0][0x1E] & econ2::AUTOINC != 0
    }

    fn read_buffer_byte(&mut self) -> u8 {
        let ptr = self.register_pair(eth::ERDPTL);
        let value = self.memory[ptr as usize & 0x1FFF];
        if self.autoinc() {
            let next = if ptr == self.register_pair(eth::ERXNDL) {
                self.register_pair(eth::ERXSTL)
            } else {
                (ptr + 1) & 0x1FFF
            };
            self.set_register_pair(eth::ERDPTL, next);
        }
        value
    }

    fn write_buffer_byte(&mut self, value: u8) {
        let ptr = self.register_pair(eth::EWRPTL);
        self.memory[ptr as usize & 0x1FFF] = value;
        if self.autoinc() {
            self.set_register_pair(eth::EWRPTL, (ptr + 1) & 0x1FFF);
        }
    }

    fn clock(&mut self, mosi: u8) -> u8 {
        self.current.push(mosi);
        let index = self.current.len() - 1;

        if index == 0 {
            self.scope = match mosi {
                0xFF => {
                    self.reset();
                    Scope::Ignored
                }
                READ_BUFFER_MEMORY => Scope::ReadBuffer,
                WRITE_BUFFER_MEMORY => Scope::WriteBuffer,
                _ => {
                    let addr = mosi & 0x1F;
                    match Opcode::from_byte(mosi) {
                        Some(Opcode::ReadControl) => Scope::ReadControl(addr),
                        Some(Opcode::WriteControl) => Scope::WriteControl(addr),
                        Some(Opcode::BitFieldSet) => Scope::BitSet(addr),
                        Some(Opcode::BitFieldClear) => Scope::BitClear(addr),
                        _ => Scope::Ignored,
                    }
                }
            };
            return 0x00;
        }

        match self.scope {
            Scope::ReadControl(addr) => {
                let delayed = Self::is_delayed(self.bank(), addr);
                match (delayed, index) {
                    (false, 1) | (true, 2) => self.read_reg(addr),
                    (true, 1) => DUMMY_BYTE,
                    _ => 0x00,
                }
            }
            Scope::WriteControl(addr) if index == 1 => {
                self.write_reg(addr, mosi);
                0x00
            }
            Scope::BitSet(addr) if index == 1 => {
                if !Self::is_delayed(self.bank(), addr) {
                    let (b, a) = Self::slot(self.bank() as usize, addr);
                    let value = self.banks[b][a] | mosi;
                    self.write_reg(addr, value);
                }
                0x00
            }
            Scope::BitClear(addr) if index == 1 => {
                if !Self::is_delayed(self.bank(), addr) {
                    let (b, a) = Self::slot(self.bank() as usize, addr);
                    let value = self.banks[b][a] & !mosi;
                    self.write_reg(addr, value);
                }
                0x00
            }
            Scope::ReadBuffer => self.read_buffer_byte(),
            Scope::WriteBuffer => {
                self.write_buffer_byte(mosi);
                0x00
            }
            _ => 0x00,
        }
    }
}

impl BusTransport for MockEnc28j60 {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> BusResult<()> {
        if self.fail_after.is_some_and(|limit| self.transfers >= limit) {
            return Err(BusError::Transfer);
        }
        assert!(self.selected, "transfer without chip select");
        assert_eq!(tx.len(), rx.len(), "unbalanced transfer");
        self.transfers += 1;
        for (out, &byte) in rx.iter_mut().zip(tx) {
            *out = self.clock(byte);
        }
        Ok(())
    }

    fn select(&mut self) -> BusResult<()> {
        if self.fail_select {
            return Err(BusError::ChipSelect);
        }
        assert!(!self.selected, "chip select asserted twice");
        self.selected = true;
        self.scope = Scope::Instruction;
        self.current.clear();
        Ok(())
    }

    fn deselect(&mut self) -> BusResult<()> {
        if self.selected {
            self.transactions.push(core::mem::take(&mut self.current));
        }
        self.selected = false;
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay that tracks total time without sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Driver Fixtures
// =============================================================================

/// Driver over a fresh emulator with a zero settle time
pub fn new_driver(config: Enc28j60Config) -> Enc28j60<MockEnc28j60, MockDelay> {
    Enc28j60::new(MockEnc28j60::new(), MockDelay::new(), config.with_settle_ns(0))
}

/// Initialized driver with an empty transaction log
pub fn ready_driver(config: Enc28j60Config) -> Enc28j60<MockEnc28j60, MockDelay> {
    let mut enc = new_driver(config);
    enc.init().unwrap();
    enc.bus_mut().clear_log();
    enc
}

/// Minimal Ethernet frame: destination, source, length/type, payload
pub fn ethernet_frame(length_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(14 + payload.len());
    frame.extend_from_slice(&[0x74, 0x69, 0x69, 0x2D, 0x30, 0x31]);
    frame.extend_from_slice(&[0x02, 0x00, 0x00, 0xAA, 0xBB, 0xCC]);
    frame.extend_from_slice(&length_type.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Assert that a chip-select scope sent exactly these bytes
#[macro_export]
macro_rules! assert_transaction {
    ($chip:expr, $index:expr, $bytes:expr) => {
        let transactions = $chip.transactions();
        assert!(
            transactions.get($index).map(|t| t.as_slice()) == Some(&$bytes[..]),
            "Expected transaction {} to be {:02X?}, but got: {:02X?}",
            $index,
            $bytes,
            transactions
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::opcode;

    fn exchange(chip: &mut MockEnc28j60, tx: &[u8]) -> Vec<u8> {
        let mut rx = vec![0u8; tx.len()];
        chip.transaction(|c| c.transfer(tx, &mut rx)).unwrap();
        rx
    }

    #[test]
    fn mock_reset_values() {
        let chip = MockEnc28j60::new();
        assert_eq!(chip.register(eth::EREVID), 0x06);
        assert_eq!(chip.register_pair(eth::ERXNDL), 0x1FFF);
        assert_eq!(chip.phy_register(phy_reg::PHID1), 0x0083);
    }

    #[test]
    fn mock_mac_read_has_dummy_byte() {
        let mut chip = MockEnc28j60::new();
        chip.set_register(mac::MACON3, 0x31);
        exchange(&mut chip, &opcode::bit_field_set(0x1F, 0x02));
        let rx = exchange(&mut chip, &opcode::read_control_delayed(0x02));
        assert_eq!(rx, [0x00, DUMMY_BYTE, 0x31]);
    }

    #[test]
    fn mock_common_registers_ignore_bank() {
        let mut chip = MockEnc28j60::new();
        exchange(&mut chip, &opcode::bit_field_set(0x1F, 0x03));
        let rx = exchange(&mut chip, &opcode::read_control(0x1F));
        assert_eq!(rx[1] & 0x03, 0x03);
        assert_eq!(chip.bank(), 3);
    }

    #[test]
    fn mock_logs_one_entry_per_scope() {
        let mut chip = MockEnc28j60::new();
        chip.transaction(|c| {
            c.write(&[WRITE_BUFFER_MEMORY])?;
            c.write(&[1, 2, 3])
        })
        .unwrap();
        assert_transaction!(chip, 0, [WRITE_BUFFER_MEMORY, 1, 2, 3]);
        assert!(!chip.is_selected());
    }

    #[test]
    fn mock_injected_frames_wrap_and_count() {
        let mut chip = MockEnc28j60::new();
        chip.set_register_pair(eth::ERXSTL, 0x0000);
        chip.set_register_pair(eth::ERXNDL, 0x003F);
        chip.set_register_pair(eth::ERXWRPTL, 0x0030);

        let header_at = chip.inject_rx_frame(&[0x55; 20]);
        assert_eq!(header_at, 0x0030);
        assert_eq!(chip.register(eth::EPKTCNT), 1);
        // 6 + 24 = 30 bytes from 0x30 wraps to 0x0E
        assert_eq!(chip.register_pair(eth::ERXWRPTL), 0x000E);
        assert_eq!(chip.memory(0x0030, 2), [0x0E, 0x00]);
    }
}
