//! SPI instruction encoding
//!
//! Every ENC28J60 instruction starts with a byte whose top three bits select
//! the operation and whose low five bits carry a register address (or the
//! fixed `0x1A` argument for buffer memory access). All encoders here are pure:
//! they return the bytes to clock out and perform no I/O.

/// Address field mask
pub const ADDRESS_MASK: u8 = 0x1F;

/// Operation codes (top three bits of the first byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Read Control Register
    ReadControl = 0b000,
    /// Read Buffer Memory
    ReadBuffer = 0b001,
    /// Write Control Register
    WriteControl = 0b010,
    /// Write Buffer Memory
    WriteBuffer = 0b011,
    /// Bit Field Set
    BitFieldSet = 0b100,
    /// Bit Field Clear
    BitFieldClear = 0b101,
    /// System Reset Command
    SystemReset = 0b111,
}

impl Opcode {
    /// Combine the opcode with a 5-bit argument
    #[inline(always)]
    #[must_use]
    pub const fn with_argument(self, argument: u8) -> u8 {
        ((self as u8) << 5) | (argument & ADDRESS_MASK)
    }

    /// Decode the opcode from an instruction byte
    ///
    /// Returns `None` for the unassigned `0b110` encoding.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte >> 5 {
            0b000 => Some(Opcode::ReadControl),
            0b001 => Some(Opcode::ReadBuffer),
            0b010 => Some(Opcode::WriteControl),
            0b011 => Some(Opcode::WriteBuffer),
            0b100 => Some(Opcode::BitFieldSet),
            0b101 => Some(Opcode::BitFieldClear),
            0b111 => Some(Opcode::SystemReset),
            _ => None,
        }
    }
}

/// Constant argument used by the buffer memory instructions
const BUFFER_ARGUMENT: u8 = 0x1A;

/// Read Buffer Memory instruction (`0b001_11010`)
pub const READ_BUFFER_MEMORY: u8 = Opcode::ReadBuffer.with_argument(BUFFER_ARGUMENT);

/// Write Buffer Memory instruction (`0b011_11010`)
pub const WRITE_BUFFER_MEMORY: u8 = Opcode::WriteBuffer.with_argument(BUFFER_ARGUMENT);

/// System Reset instruction pair
pub const SYSTEM_RESET: [u8; 2] = [0xFF, 0xFF];

/// Read an ETH register: the value arrives in the second byte
#[must_use]
pub const fn read_control(address: u8) -> [u8; 2] {
    [Opcode::ReadControl.with_argument(address), 0x00]
}

/// Read a MAC/MII register: a dummy byte precedes the value, so it arrives in the third byte
#[must_use]
pub const fn read_control_delayed(address: u8) -> [u8; 3] {
    [Opcode::ReadControl.with_argument(address), 0x00, 0x00]
}

/// Write a control register
#[must_use]
pub const fn write_control(address: u8, value: u8) -> [u8; 2] {
    [Opcode::WriteControl.with_argument(address), value]
}

/// OR `mask` into an ETH register
#[must_use]
pub const fn bit_field_set(address: u8, mask: u8) -> [u8; 2] {
    [Opcode::BitFieldSet.with_argument(address), mask]
}

/// Clear the bits of `mask` in an ETH register
#[must_use]
pub const fn bit_field_clear(address: u8, mask: u8) -> [u8; 2] {
    [Opcode::BitFieldClear.with_argument(address), mask]
}
