//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers used
//! throughout the ENC28J60 driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame sizes**: Ethernet frame dimensions
//! - **Packet memory**: On-chip buffer size and default region split
//! - **Timing**: Timeouts, delays, and polling intervals
//! - **MAC defaults**: Inter-packet gaps, LED mode, revision
//!
//! # Note
//!
//! Register addresses and bit definitions live in
//! [`register`](super::register) and [`phy_regs`](super::phy_regs).

// =============================================================================
// Frame Sizes
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Ethernet header size (dst MAC + src MAC + length/type)
pub const ETH_HEADER_SIZE: usize = 14;

/// CRC/FCS size at end of frame
pub const CRC_SIZE: usize = 4;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Maximum Ethernet frame size including CRC (1500 + 14 header + 4 CRC)
pub const MAX_FRAME_SIZE: usize = MTU + ETH_HEADER_SIZE + CRC_SIZE;

/// Minimum Ethernet frame size (excluding CRC)
pub const MIN_FRAME_SIZE: usize = 60;

/// IPv4 EtherType
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Frame length reported for IPv4 frames under the EtherType compatibility policy
pub const IPV4_COMPAT_FRAME_LEN: usize = 64 + ETH_HEADER_SIZE;

// =============================================================================
// Packet Memory
// =============================================================================

/// Size of the on-chip packet memory (8 KB)
pub const BUFFER_MEMORY_SIZE: usize = 0x2000;

/// Highest valid packet memory address
pub const BUFFER_MEMORY_END: u16 = 0x1FFF;

/// Default receive region start
pub const DEFAULT_RX_START: u16 = 0x0000;

/// Default receive region end (odd, per errata)
pub const DEFAULT_RX_END: u16 = 0x0BFF;

/// Default transmit region start
pub const DEFAULT_TX_START: u16 = 0x0C00;

/// Default transmit region end
pub const DEFAULT_TX_END: u16 = 0x11FF;

/// Per-packet control byte written ahead of every transmitted frame
pub const TX_CONTROL_BYTE_SIZE: usize = 1;

/// Transmit status vector the MAC appends after the frame
pub const TX_STATUS_VECTOR_SIZE: usize = 7;

// =============================================================================
// Timing Constants
// =============================================================================

/// Poll interval for every bounded wait loop, in microseconds
pub const POLL_INTERVAL_US: u32 = 10;

/// Wait after the system reset command before polling ESTAT.CLKRDY (errata: >1 ms)
pub const RESET_SETTLE_US: u32 = 1_000;

/// Delay between setting MICMD.MIIRD and the first MISTAT.BUSY poll (>10.24 µs)
pub const MII_READ_SETTLE_US: u32 = 12;

/// Default MII busy timeout in microseconds
pub const DEFAULT_MII_TIMEOUT_US: u32 = 1_000;

/// Default transmit completion timeout in microseconds
pub const DEFAULT_TX_TIMEOUT_US: u32 = 50_000;

/// Default oscillator start-up timeout after reset, in microseconds
pub const DEFAULT_CLOCK_READY_TIMEOUT_US: u32 = 10_000;

/// Default chip-select idle time between transactions, in nanoseconds
pub const DEFAULT_SETTLE_NS: u32 = 250;

/// Attempts at reading a stable EPKTCNT/ERXWRPT pair
pub const FREE_SPACE_SAMPLE_ATTEMPTS: u8 = 8;

// =============================================================================
// MAC Defaults
// =============================================================================

/// Default MAC address (locally chosen, "tii-01")
pub const DEFAULT_MAC_ADDR: [u8; MAC_ADDR_LEN] = [0x74, 0x69, 0x69, 0x2D, 0x30, 0x31];

/// Back-to-back inter-packet gap for full duplex (9.6 µs)
pub const BACK_TO_BACK_GAP_FULL: u8 = 0x15;

/// Back-to-back inter-packet gap for half duplex (9.6 µs)
pub const BACK_TO_BACK_GAP_HALF: u8 = 0x12;

/// Non-back-to-back inter-packet gap, low byte
pub const NON_BACK_TO_BACK_GAP_LOW: u8 = 0x12;

/// Non-back-to-back inter-packet gap, high byte (half duplex only)
pub const NON_BACK_TO_BACK_GAP_HIGH: u8 = 0x0C;

/// Default PHLCON value: LEDA link/activity, LEDB transmit/receive, stretched
pub const DEFAULT_LED_CONFIG: u16 = 0x3422;

/// EREVID value of the silicon revision this driver targets
pub const EXPECTED_REVISION: u8 = 0x06;
