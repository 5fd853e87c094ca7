//! Core driver components for the ENC28J60.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`enc28j60`] - The main driver; register, PHY, memory, transmit and
//!   receive operations extend it from private submodules
//! - [`interrupt`] - Interrupt flags
//! - [`ring`] - Packet memory layout and receive ring arithmetic
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::driver::{Enc28j60, Enc28j60Config, Error};
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! ```

// Submodules
pub mod config;
pub mod enc28j60;
pub mod error;
pub mod interrupt;
pub mod ring;

mod access;
mod diagnostics;
mod memory;
mod mii;
mod rx;
mod tx;

// Re-exports for convenience
pub use config::{
    ClockOut, Duplex, Enc28j60Config, InterPacketGap, ReceiveLengthPolicy, RxFilter, State,
};
pub use enc28j60::Enc28j60;
pub use error::{
    BusError, BusResult, ConfigError, ConfigResult, Error, IoError, IoResult, RegisterError,
    RegisterResult, Result,
};
pub use interrupt::InterruptStatus;
pub use ring::BufferLayout;
pub use tx::TransmitStatus;
