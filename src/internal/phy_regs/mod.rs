//! PHY Register Definitions
//!
//! The ENC28J60 integrates its 10BASE-T PHY behind the MII management
//! interface. These registers are reached through MIREGADR/MIWR/MIRD, never
//! through direct control register access.
//!
//! | Address | Name | Description |
//! |---------|------|-------------|
//! | 0x00 | PHCON1 | PHY control 1 |
//! | 0x01 | PHSTAT1 | Physical layer status 1 |
//! | 0x02 | PHID1 | PHY identifier 1 |
//! | 0x03 | PHID2 | PHY identifier 2 |
//! | 0x10 | PHCON2 | PHY control 2 |
//! | 0x11 | PHSTAT2 | Physical layer status 2 |
//! | 0x12 | PHIE | PHY interrupt enable |
//! | 0x13 | PHIR | PHY interrupt request |
//! | 0x14 | PHLCON | LED configuration |

/// PHY register addresses
pub mod phy_reg {
    /// PHY control 1
    pub const PHCON1: u8 = 0x00;
    /// Physical layer status 1
    pub const PHSTAT1: u8 = 0x01;
    /// PHY identifier 1
    pub const PHID1: u8 = 0x02;
    /// PHY identifier 2
    pub const PHID2: u8 = 0x03;
    /// PHY control 2
    pub const PHCON2: u8 = 0x10;
    /// Physical layer status 2
    pub const PHSTAT2: u8 = 0x11;
    /// PHY interrupt enable
    pub const PHIE: u8 = 0x12;
    /// PHY interrupt request
    pub const PHIR: u8 = 0x13;
    /// LED configuration
    pub const PHLCON: u8 = 0x14;
}

/// Expected PHID1 value
pub const PHY_ID1: u16 = 0x0083;

/// Expected PHID2 value with the revision bits masked off
pub const PHY_ID2: u16 = 0x1400;

/// PHID2 revision mask
pub const PHY_ID2_MASK: u16 = 0xFC00;

/// PHCON1 bits
pub mod phcon1 {
    /// PHY software reset
    pub const PRST: u16 = 1 << 15;
    /// Loopback
    pub const PLOOPBK: u16 = 1 << 14;
    /// Power down
    pub const PPWRSV: u16 = 1 << 11;
    /// Full duplex
    pub const PDPXMD: u16 = 1 << 8;
}

/// PHSTAT1 bits
pub mod phstat1 {
    /// Full duplex capable
    pub const PFDPX: u16 = 1 << 12;
    /// Half duplex capable
    pub const PHDPX: u16 = 1 << 11;
    /// Latching link status
    pub const LLSTAT: u16 = 1 << 2;
    /// Latching jabber status
    pub const JBSTAT: u16 = 1 << 1;
}

/// PHCON2 bits
pub mod phcon2 {
    /// Force link up
    pub const FRCLNK: u16 = 1 << 14;
    /// Disable twisted-pair transmitter
    pub const TXDIS: u16 = 1 << 13;
    /// Disable jabber correction
    pub const JABBER: u16 = 1 << 10;
    /// Disable half-duplex loopback
    pub const HDLDIS: u16 = 1 << 8;
}

/// PHSTAT2 bits
pub mod phstat2 {
    /// Transmitting
    pub const TXSTAT: u16 = 1 << 13;
    /// Receiving
    pub const RXSTAT: u16 = 1 << 12;
    /// Collision
    pub const COLSTAT: u16 = 1 << 11;
    /// Link up
    pub const LSTAT: u16 = 1 << 10;
    /// Full duplex in use
    pub const DPXSTAT: u16 = 1 << 9;
    /// Polarity reversed
    pub const PLRITY: u16 = 1 << 5;
}

/// PHIE bits
pub mod phie {
    /// Link change interrupt enable
    pub const PLNKIE: u16 = 1 << 4;
    /// Global PHY interrupt enable
    pub const PGEIE: u16 = 1 << 1;
}

/// PHIR bits
pub mod phir {
    /// Link change interrupt
    pub const PLNKIF: u16 = 1 << 4;
    /// Global PHY interrupt
    pub const PGIF: u16 = 1 << 2;
}
