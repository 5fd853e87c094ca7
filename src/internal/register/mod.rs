//! ENC28J60 control register map
//!
//! Each register is named by a canonical identifier `(bank << 5) | address`
//! plus its kind. ETH registers answer a read with their value in the second
//! byte; MAC and MII registers clock out a dummy byte first.
//!
//! Addresses 0x1B-0x1F (EIE, EIR, ESTAT, ECON2, ECON1) are mapped into every
//! bank and never require a bank switch.

use crate::driver::error::{RegisterError, RegisterResult};

/// First address of the registers shared by all banks
pub const COMMON_REGISTER_START: u8 = 0x1B;

// =============================================================================
// Bank
// =============================================================================

/// Control register bank (ECON1.BSEL1:BSEL0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bank {
    /// Bank 0: buffer pointers and DMA
    #[default]
    Bank0 = 0,
    /// Bank 1: hash table, pattern match, receive filter, packet count
    Bank1 = 1,
    /// Bank 2: MAC and MII control
    Bank2 = 2,
    /// Bank 3: MAC address, MII status, revision, clock out
    Bank3 = 3,
}

impl Bank {
    /// Bank from the two ECON1 bank-select bits
    #[inline(always)]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Bank::Bank0,
            1 => Bank::Bank1,
            2 => Bank::Bank2,
            _ => Bank::Bank3,
        }
    }

    /// Value of the ECON1 bank-select bits for this bank
    #[inline(always)]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// Register
// =============================================================================

/// How a register answers a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterKind {
    /// Ethernet block register; supports bit-field set/clear
    Eth,
    /// MAC register; read takes a dummy byte
    Mac,
    /// MII management register; read takes a dummy byte
    Mii,
}

/// A control register: canonical identifier plus kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    id: u8,
    kind: RegisterKind,
}

impl Register {
    const fn new(id: u8, kind: RegisterKind) -> Self {
        Self { id, kind }
    }

    /// Build a register from a raw canonical identifier
    ///
    /// Fails with [`RegisterError::InvalidRegister`] when bit 7 is set, since
    /// such an identifier names no bank in 0-3.
    pub const fn from_id(id: u8, kind: RegisterKind) -> RegisterResult<Self> {
        if id & 0x80 != 0 {
            return Err(RegisterError::InvalidRegister);
        }
        Ok(Self::new(id, kind))
    }

    /// Look up the register at `address` within `bank`, inferring its kind
    pub const fn at(bank: Bank, address: u8) -> RegisterResult<Self> {
        if address > 0x1F {
            return Err(RegisterError::InvalidRegister);
        }
        let kind = match (bank, address) {
            (_, a) if a >= COMMON_REGISTER_START => RegisterKind::Eth,
            (Bank::Bank2, 0x12..=0x19) => RegisterKind::Mii,
            (Bank::Bank2, _) => RegisterKind::Mac,
            (Bank::Bank3, 0x00..=0x05) => RegisterKind::Mac,
            (Bank::Bank3, 0x0A) => RegisterKind::Mii,
            _ => RegisterKind::Eth,
        };
        Ok(Self::new((bank.bits() << 5) | address, kind))
    }

    /// Canonical identifier `(bank << 5) | address`
    #[inline(always)]
    #[must_use]
    pub const fn id(self) -> u8 {
        self.id
    }

    /// 5-bit address within the bank
    #[inline(always)]
    #[must_use]
    pub const fn address(self) -> u8 {
        self.id & 0x1F
    }

    /// Bank the register lives in: `(id & 0x60) >> 5`
    #[inline(always)]
    #[must_use]
    pub const fn bank(self) -> Bank {
        Bank::from_bits((self.id & 0x60) >> 5)
    }

    /// Register kind
    #[inline(always)]
    #[must_use]
    pub const fn kind(self) -> RegisterKind {
        self.kind
    }

    /// True for EIE, EIR, ESTAT, ECON2 and ECON1
    #[inline(always)]
    #[must_use]
    pub const fn is_common(self) -> bool {
        self.address() >= COMMON_REGISTER_START
    }

    /// True when a read must clock out a dummy byte first
    #[inline(always)]
    #[must_use]
    pub const fn needs_dummy_byte(self) -> bool {
        !matches!(self.kind, RegisterKind::Eth)
    }

    /// Register holding the high byte of a low/high pair
    #[inline(always)]
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.id + 1, self.kind)
    }
}

const fn e(id: u8) -> Register {
    Register::new(id, RegisterKind::Eth)
}

const fn m(id: u8) -> Register {
    Register::new(id, RegisterKind::Mac)
}

const fn mi(id: u8) -> Register {
    Register::new(id, RegisterKind::Mii)
}

// =============================================================================
// Register Definitions
// =============================================================================

/// ETH registers
pub mod eth {
    use super::{Register, e};

    // Common (every bank)
    /// Interrupt enable
    pub const EIE: Register = e(0x1B);
    /// Interrupt request flags
    pub const EIR: Register = e(0x1C);
    /// Ethernet status
    pub const ESTAT: Register = e(0x1D);
    /// Ethernet control 2
    pub const ECON2: Register = e(0x1E);
    /// Ethernet control 1
    pub const ECON1: Register = e(0x1F);

    // Bank 0
    /// Read pointer, low byte
    pub const ERDPTL: Register = e(0x00);
    /// Read pointer, high byte
    pub const ERDPTH: Register = e(0x01);
    /// Write pointer, low byte
    pub const EWRPTL: Register = e(0x02);
    /// Write pointer, high byte
    pub const EWRPTH: Register = e(0x03);
    /// Transmit start, low byte
    pub const ETXSTL: Register = e(0x04);
    /// Transmit start, high byte
    pub const ETXSTH: Register = e(0x05);
    /// Transmit end, low byte
    pub const ETXNDL: Register = e(0x06);
    /// Transmit end, high byte
    pub const ETXNDH: Register = e(0x07);
    /// Receive start, low byte
    pub const ERXSTL: Register = e(0x08);
    /// Receive start, high byte
    pub const ERXSTH: Register = e(0x09);
    /// Receive end, low byte
    pub const ERXNDL: Register = e(0x0A);
    /// Receive end, high byte
    pub const ERXNDH: Register = e(0x0B);
    /// Receive read pointer, low byte
    pub const ERXRDPTL: Register = e(0x0C);
    /// Receive read pointer, high byte
    pub const ERXRDPTH: Register = e(0x0D);
    /// Receive write pointer, low byte
    pub const ERXWRPTL: Register = e(0x0E);
    /// Receive write pointer, high byte
    pub const ERXWRPTH: Register = e(0x0F);
    /// DMA start, low byte
    pub const EDMASTL: Register = e(0x10);
    /// DMA start, high byte
    pub const EDMASTH: Register = e(0x11);
    /// DMA end, low byte
    pub const EDMANDL: Register = e(0x12);
    /// DMA end, high byte
    pub const EDMANDH: Register = e(0x13);
    /// DMA destination, low byte
    pub const EDMADSTL: Register = e(0x14);
    /// DMA destination, high byte
    pub const EDMADSTH: Register = e(0x15);
    /// DMA checksum, low byte
    pub const EDMACSL: Register = e(0x16);
    /// DMA checksum, high byte
    pub const EDMACSH: Register = e(0x17);

    // Bank 1
    /// Hash table byte 0 (EHT0..EHT7 follow)
    pub const EHT0: Register = e(0x20);
    /// Pattern match mask byte 0 (EPMM0..EPMM7 follow)
    pub const EPMM0: Register = e(0x28);
    /// Pattern match checksum, low byte
    pub const EPMCSL: Register = e(0x30);
    /// Pattern match checksum, high byte
    pub const EPMCSH: Register = e(0x31);
    /// Pattern match offset, low byte
    pub const EPMOL: Register = e(0x34);
    /// Pattern match offset, high byte
    pub const EPMOH: Register = e(0x35);
    /// Receive filter control
    pub const ERXFCON: Register = e(0x38);
    /// Pending packet count
    pub const EPKTCNT: Register = e(0x39);

    // Bank 3
    /// Built-in self-test fill seed
    pub const EBSTSD: Register = e(0x66);
    /// Built-in self-test control
    pub const EBSTCON: Register = e(0x67);
    /// Built-in self-test checksum, low byte
    pub const EBSTCSL: Register = e(0x68);
    /// Built-in self-test checksum, high byte
    pub const EBSTCSH: Register = e(0x69);
    /// Silicon revision
    pub const EREVID: Register = e(0x72);
    /// Clock output control
    pub const ECOCON: Register = e(0x75);
    /// Flow control
    pub const EFLOCON: Register = e(0x77);
    /// Pause timer value, low byte
    pub const EPAUSL: Register = e(0x78);
    /// Pause timer value, high byte
    pub const EPAUSH: Register = e(0x79);
}

/// MAC registers
pub mod mac {
    use super::{Register, m};

    // Bank 2
    /// MAC control 1
    pub const MACON1: Register = m(0x40);
    /// MAC control 3
    pub const MACON3: Register = m(0x42);
    /// MAC control 4
    pub const MACON4: Register = m(0x43);
    /// Back-to-back inter-packet gap
    pub const MABBIPG: Register = m(0x44);
    /// Non-back-to-back inter-packet gap, low byte
    pub const MAIPGL: Register = m(0x46);
    /// Non-back-to-back inter-packet gap, high byte
    pub const MAIPGH: Register = m(0x47);
    /// Retransmission maximum
    pub const MACLCON1: Register = m(0x48);
    /// Collision window
    pub const MACLCON2: Register = m(0x49);
    /// Maximum frame length, low byte
    pub const MAMXFLL: Register = m(0x4A);
    /// Maximum frame length, high byte
    pub const MAMXFLH: Register = m(0x4B);

    // Bank 3 (note the byte order of the address registers)
    /// MAC address byte 5
    pub const MAADR5: Register = m(0x60);
    /// MAC address byte 6
    pub const MAADR6: Register = m(0x61);
    /// MAC address byte 3
    pub const MAADR3: Register = m(0x62);
    /// MAC address byte 4
    pub const MAADR4: Register = m(0x63);
    /// MAC address byte 1
    pub const MAADR1: Register = m(0x64);
    /// MAC address byte 2
    pub const MAADR2: Register = m(0x65);

    /// MAC address registers in address byte order (byte 1 first)
    pub const MAADR: [Register; 6] = [MAADR1, MAADR2, MAADR3, MAADR4, MAADR5, MAADR6];
}

/// MII management registers
pub mod mii {
    use super::{Register, mi};

    /// MII command
    pub const MICMD: Register = mi(0x52);
    /// MII register address
    pub const MIREGADR: Register = mi(0x54);
    /// MII write data, low byte
    pub const MIWRL: Register = mi(0x56);
    /// MII write data, high byte (writing starts the cycle)
    pub const MIWRH: Register = mi(0x57);
    /// MII read data, low byte
    pub const MIRDL: Register = mi(0x58);
    /// MII read data, high byte
    pub const MIRDH: Register = mi(0x59);
    /// MII status (bank 3)
    pub const MISTAT: Register = mi(0x6A);
}

// =============================================================================
// Bit Definitions
// =============================================================================

/// Register bit masks
pub mod bits {
    /// EIE bits
    pub mod eie {
        /// Global interrupt enable
        pub const INTIE: u8 = 1 << 7;
        /// Receive packet pending interrupt enable
        pub const PKTIE: u8 = 1 << 6;
        /// DMA interrupt enable
        pub const DMAIE: u8 = 1 << 5;
        /// Link status change interrupt enable
        pub const LINKIE: u8 = 1 << 4;
        /// Transmit interrupt enable
        pub const TXIE: u8 = 1 << 3;
        /// Transmit error interrupt enable
        pub const TXERIE: u8 = 1 << 1;
        /// Receive error interrupt enable
        pub const RXERIE: u8 = 1 << 0;
    }

    /// EIR bits
    pub mod eir {
        /// Receive packet pending (cleared by PKTDEC)
        pub const PKTIF: u8 = 1 << 6;
        /// DMA done
        pub const DMAIF: u8 = 1 << 5;
        /// Link change
        pub const LINKIF: u8 = 1 << 4;
        /// Transmit done
        pub const TXIF: u8 = 1 << 3;
        /// Transmit error
        pub const TXERIF: u8 = 1 << 1;
        /// Receive error
        pub const RXERIF: u8 = 1 << 0;
    }

    /// ESTAT bits
    pub mod estat {
        /// INT pin asserted
        pub const INT: u8 = 1 << 7;
        /// Buffer error
        pub const BUFER: u8 = 1 << 6;
        /// Late collision
        pub const LATECOL: u8 = 1 << 4;
        /// Receive busy
        pub const RXBUSY: u8 = 1 << 2;
        /// Transmit abort
        pub const TXABRT: u8 = 1 << 1;
        /// Oscillator ready
        pub const CLKRDY: u8 = 1 << 0;
    }

    /// ECON2 bits
    pub mod econ2 {
        /// Buffer pointer auto-increment
        pub const AUTOINC: u8 = 1 << 7;
        /// Decrement the pending packet counter
        pub const PKTDEC: u8 = 1 << 6;
        /// Power save
        pub const PWRSV: u8 = 1 << 5;
        /// Voltage regulator power save
        pub const VRPS: u8 = 1 << 3;
    }

    /// ECON1 bits
    pub mod econ1 {
        /// Transmit logic reset
        pub const TXRST: u8 = 1 << 7;
        /// Receive logic reset
        pub const RXRST: u8 = 1 << 6;
        /// DMA start
        pub const DMAST: u8 = 1 << 5;
        /// DMA checksum mode
        pub const CSUMEN: u8 = 1 << 4;
        /// Transmit request to send
        pub const TXRTS: u8 = 1 << 3;
        /// Receive enable
        pub const RXEN: u8 = 1 << 2;
        /// Bank select mask
        pub const BSEL: u8 = 0x03;
    }

    /// ERXFCON bits
    pub mod erxfcon {
        /// Accept unicast frames addressed to us
        pub const UCEN: u8 = 1 << 7;
        /// AND (instead of OR) the enabled filters
        pub const ANDOR: u8 = 1 << 6;
        /// Reject frames with bad CRC
        pub const CRCEN: u8 = 1 << 5;
        /// Pattern match filter
        pub const PMEN: u8 = 1 << 4;
        /// Magic packet filter
        pub const MPEN: u8 = 1 << 3;
        /// Hash table filter
        pub const HTEN: u8 = 1 << 2;
        /// Accept multicast
        pub const MCEN: u8 = 1 << 1;
        /// Accept broadcast
        pub const BCEN: u8 = 1 << 0;
    }

    /// MACON1 bits
    pub mod macon1 {
        /// Transmit pause frames
        pub const TXPAUS: u8 = 1 << 3;
        /// Honor received pause frames
        pub const RXPAUS: u8 = 1 << 2;
        /// Pass control frames to the buffer
        pub const PASSALL: u8 = 1 << 1;
        /// MAC receive enable
        pub const MARXEN: u8 = 1 << 0;
    }

    /// MACON3 bits
    pub mod macon3 {
        /// Pad to 60 bytes and append CRC
        pub const PADCFG0: u8 = 1 << 5;
        /// Append CRC on transmit
        pub const TXCRCEN: u8 = 1 << 4;
        /// Proprietary header
        pub const PHDREN: u8 = 1 << 3;
        /// Huge frames
        pub const HFRMEN: u8 = 1 << 2;
        /// Length field checking
        pub const FRMLNEN: u8 = 1 << 1;
        /// MAC full duplex
        pub const FULDPX: u8 = 1 << 0;
    }

    /// MACON4 bits
    pub mod macon4 {
        /// Defer transmission indefinitely (802.3 compliance)
        pub const DEFER: u8 = 1 << 6;
    }

    /// MICMD bits
    pub mod micmd {
        /// Continuous scan
        pub const MIISCAN: u8 = 1 << 1;
        /// Read request
        pub const MIIRD: u8 = 1 << 0;
    }

    /// MISTAT bits
    pub mod mistat {
        /// Scan data not valid
        pub const NVALID: u8 = 1 << 2;
        /// Scan in progress
        pub const SCAN: u8 = 1 << 1;
        /// MII busy
        pub const BUSY: u8 = 1 << 0;
    }
}
