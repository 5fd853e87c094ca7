//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Internal constants and magic numbers
//! - [`opcode`]: SPI instruction encoding
//! - [`register`]: Control register map and bit definitions
//! - [`phy_regs`]: PHY register map reached through MII
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. The register map is
//! re-exported through [`crate::registers`]; everything else is subject to
//! change without notice.

pub(crate) mod constants;
pub(crate) mod opcode;
pub(crate) mod phy_regs;
pub(crate) mod register;
