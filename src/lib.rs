//! ENC28J60 Ethernet Driver
//!
//! A `no_std`, `no_alloc` driver for the Microchip ENC28J60, a standalone
//! 10BASE-T Ethernet controller reached over SPI.
//!
//! The chip holds an 8 KB packet buffer split into a receive ring and a
//! transmit region, four banks of control registers, and an internal PHY
//! reached through MII registers. The driver talks to all of it through a
//! [`BusTransport`]; [`SpiTransport`] adapts any `embedded-hal` 1.0 `SpiBus`
//! plus chip-select pin.
//!
//! # Architecture
//!
//! 1. **Driver** ([`driver`]): [`Enc28j60`] with register, PHY, buffer
//!    memory, transmit and receive operations
//! 2. **Frames** ([`frame`]): Receive status headers and transmit prefixes
//! 3. **HAL** ([`hal`]): The SPI transport contract
//! 4. **Registers** ([`registers`]): Bank-aware register map and bit masks
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for public types
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable the ISR-safe [`SharedEnc28j60`](sync::SharedEnc28j60) slot
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::{Enc28j60, Enc28j60Config, SpiTransport};
//!
//! let transport = SpiTransport::new(spi, cs);
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]);
//!
//! let mut enc = Enc28j60::new(transport, delay, config);
//! enc.init()?;
//!
//! let mut frame = [0u8; ph_enc28j60::constants::MAX_FRAME_SIZE];
//! loop {
//!     if enc.pending_packets()? > 0 {
//!         let len = enc.receive(&mut frame)?;
//!         // handle &frame[..len]
//!     }
//! }
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
// Clippy lint levels live in Cargo.toml.

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod frame;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{
    ClockOut, Duplex, Enc28j60Config, InterPacketGap, ReceiveLengthPolicy, RxFilter, State,
};
pub use driver::enc28j60::Enc28j60;
pub use driver::error::{
    BusError, BusResult, ConfigError, ConfigResult, Error, IoError, IoResult, RegisterError,
    RegisterResult, Result,
};
pub use driver::interrupt::InterruptStatus;
pub use driver::ring::BufferLayout;
pub use driver::TransmitStatus;
pub use frame::{PacketStatusHeader, ReceiveStatus};
pub use hal::bus::{BusTransport, SpiTransport};

#[cfg(feature = "critical-section")]
pub use sync::SharedEnc28j60;

/// Register map for direct access.
///
/// Most users should prefer the driver operations; these are for the raw
/// [`Enc28j60::read_register`] family and for diagnostics.
pub mod registers {
    pub use crate::internal::register::{
        Bank, COMMON_REGISTER_START, Register, RegisterKind, bits, eth, mac, mii,
    };

    /// PHY registers, reached with [`Enc28j60::read_phy`](crate::Enc28j60::read_phy)
    pub mod phy {
        pub use crate::internal::phy_regs::*;
    }
}

/// Shared driver constants.
pub mod constants {
    pub use crate::internal::constants::{
        // Frame sizes
        CRC_SIZE,
        ETH_HEADER_SIZE,
        MAC_ADDR_LEN,
        MAX_FRAME_SIZE,
        MIN_FRAME_SIZE,
        MTU,
        // Packet memory
        BUFFER_MEMORY_END,
        BUFFER_MEMORY_SIZE,
        DEFAULT_RX_END,
        DEFAULT_RX_START,
        DEFAULT_TX_END,
        DEFAULT_TX_START,
        // Identity
        DEFAULT_MAC_ADDR,
        EXPECTED_REVISION,
    };
}
