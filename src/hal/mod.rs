//! Hardware Abstraction Layer
//!
//! The ENC28J60 sits behind a SPI bus, so the only hardware this crate
//! touches directly is the bus and its chip-select pin.
//!
//! # Modules
//!
//! - [`bus`]: The [`BusTransport`] contract and its `embedded-hal` implementation
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod bus;

// Re-export commonly used types
pub use bus::{BusTransport, SpiTransport};
