//! Receive status header
//!
//! The chip writes a 6-byte receive status vector ahead of every frame in
//! the receive ring. Together with the first 14 bytes of the Ethernet frame
//! that makes a fixed 20-byte header:
//!
//! | Offset | Size | Field | Byte order |
//! |--------|------|-------|------------|
//! | 0 | 2 | Next packet pointer | little-endian |
//! | 2 | 2 | Received byte count (CRC included) | little-endian |
//! | 4 | 2 | Receive status (RSV bits 16-31) | little-endian |
//! | 6 | 6 | Destination MAC | - |
//! | 12 | 6 | Source MAC | - |
//! | 18 | 2 | Length/type | big-endian |

use crate::driver::config::ReceiveLengthPolicy;
use crate::internal::constants::{
    CRC_SIZE, ETH_HEADER_SIZE, ETHERTYPE_IPV4, IPV4_COMPAT_FRAME_LEN, MAC_ADDR_LEN,
};

/// Size of the receive status vector ahead of each frame
pub const RX_STATUS_VECTOR_SIZE: usize = 6;

/// Size of the decoded header (status vector + Ethernet header)
pub const RX_HEADER_SIZE: usize = RX_STATUS_VECTOR_SIZE + ETH_HEADER_SIZE;

/// Field offsets within the receive header
pub mod offset {
    /// Next packet pointer
    pub const NEXT_PACKET: usize = 0;
    /// Byte count
    pub const BYTE_COUNT: usize = 2;
    /// Receive status
    pub const STATUS: usize = 4;
    /// Destination MAC
    pub const DESTINATION: usize = 6;
    /// Source MAC
    pub const SOURCE: usize = 12;
    /// Length/type
    pub const LENGTH_TYPE: usize = 18;
}

// =============================================================================
// Receive Status
// =============================================================================

/// Upper half of the receive status vector (RSV bits 16-31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiveStatus(u16);

impl ReceiveStatus {
    const LONG_EVENT: u16 = 1 << 0;
    const CARRIER_EVENT: u16 = 1 << 2;
    const CRC_ERROR: u16 = 1 << 4;
    const LENGTH_CHECK_ERROR: u16 = 1 << 5;
    const LENGTH_OUT_OF_RANGE: u16 = 1 << 6;
    const RECEIVED_OK: u16 = 1 << 7;
    const MULTICAST: u16 = 1 << 8;
    const BROADCAST: u16 = 1 << 9;
    const CONTROL_FRAME: u16 = 1 << 11;
    const PAUSE_FRAME: u16 = 1 << 12;
    const VLAN: u16 = 1 << 14;

    /// Wrap raw status bits
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw status bits
    pub const fn raw(self) -> u16 {
        self.0
    }

    const fn has(self, mask: u16) -> bool {
        self.0 & mask != 0
    }

    /// Frame received with valid CRC and no symbol errors
    pub const fn received_ok(self) -> bool {
        self.has(Self::RECEIVED_OK)
    }

    /// CRC did not match
    pub const fn crc_error(self) -> bool {
        self.has(Self::CRC_ERROR)
    }

    /// Length/type field did not match the actual length
    pub const fn length_check_error(self) -> bool {
        self.has(Self::LENGTH_CHECK_ERROR)
    }

    /// Length/type field larger than 1500
    pub const fn length_out_of_range(self) -> bool {
        self.has(Self::LENGTH_OUT_OF_RANGE)
    }

    /// Destination was a multicast address
    pub const fn multicast(self) -> bool {
        self.has(Self::MULTICAST)
    }

    /// Destination was the broadcast address
    pub const fn broadcast(self) -> bool {
        self.has(Self::BROADCAST)
    }

    /// MAC control frame
    pub const fn control_frame(self) -> bool {
        self.has(Self::CONTROL_FRAME)
    }

    /// PAUSE control frame
    pub const fn pause_frame(self) -> bool {
        self.has(Self::PAUSE_FRAME)
    }

    /// VLAN tagged frame
    pub const fn vlan(self) -> bool {
        self.has(Self::VLAN)
    }

    /// Packet over 50 000 bit times, or a packet was dropped before this one
    pub const fn long_event(self) -> bool {
        self.has(Self::LONG_EVENT)
    }

    /// Carrier event seen since the last receive
    pub const fn carrier_event(self) -> bool {
        self.has(Self::CARRIER_EVENT)
    }
}

// =============================================================================
// Packet Status Header
// =============================================================================

/// Decoded receive header of the packet at the head of the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketStatusHeader {
    /// Address of the following packet's header
    pub next_packet: u16,
    /// Received byte count, CRC included
    pub byte_count: u16,
    /// Receive status flags
    pub status: ReceiveStatus,
    /// Destination MAC
    pub destination: [u8; MAC_ADDR_LEN],
    /// Source MAC
    pub source: [u8; MAC_ADDR_LEN],
    /// Length/type field
    pub length_type: u16,
}

impl PacketStatusHeader {
    /// Decode a raw header
    #[must_use]
    pub fn parse(raw: &[u8; RX_HEADER_SIZE]) -> Self {
        let le = |at: usize| u16::from_le_bytes([raw[at], raw[at + 1]]);
        let mut destination = [0u8; MAC_ADDR_LEN];
        destination.copy_from_slice(&raw[offset::DESTINATION..offset::DESTINATION + MAC_ADDR_LEN]);
        let mut source = [0u8; MAC_ADDR_LEN];
        source.copy_from_slice(&raw[offset::SOURCE..offset::SOURCE + MAC_ADDR_LEN]);

        Self {
            next_packet: le(offset::NEXT_PACKET),
            byte_count: le(offset::BYTE_COUNT),
            status: ReceiveStatus::from_raw(le(offset::STATUS)),
            destination,
            source,
            length_type: u16::from_be_bytes([
                raw[offset::LENGTH_TYPE],
                raw[offset::LENGTH_TYPE + 1],
            ]),
        }
    }

    /// Frame length without CRC, as reported by the chip
    pub const fn frame_length(&self) -> usize {
        (self.byte_count as usize).saturating_sub(CRC_SIZE)
    }

    /// Usable frame length under `policy`
    pub const fn available_length(&self, policy: ReceiveLengthPolicy) -> usize {
        match policy {
            ReceiveLengthPolicy::ByteCount => self.frame_length(),
            ReceiveLengthPolicy::EtherTypeCompat => {
                if self.length_type == ETHERTYPE_IPV4 {
                    IPV4_COMPAT_FRAME_LEN
                } else {
                    self.length_type as usize + ETH_HEADER_SIZE
                }
            }
        }
    }
}
