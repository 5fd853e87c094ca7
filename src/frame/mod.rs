//! Frame layouts shared by the transmit and receive pipelines
//!
//! - [`header`]: the receive status header the chip writes ahead of each frame
//! - [`TxPrefix`]: the control byte + Ethernet header written ahead of each payload

pub mod header;

pub use header::{PacketStatusHeader, RX_HEADER_SIZE, RX_STATUS_VECTOR_SIZE, ReceiveStatus};

use crate::internal::constants::{ETH_HEADER_SIZE, MAC_ADDR_LEN, TX_CONTROL_BYTE_SIZE};

/// Per-packet control byte: 0 lets MACON3 govern padding and CRC
pub const TX_CONTROL_DEFAULT: u8 = 0x00;

/// Bytes written ahead of a payload: control byte, destination, source, length/type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxPrefix([u8; TX_CONTROL_BYTE_SIZE + ETH_HEADER_SIZE]);

impl TxPrefix {
    /// Build the prefix; `length_type` is written in network byte order
    #[must_use]
    pub fn new(
        destination: &[u8; MAC_ADDR_LEN],
        source: &[u8; MAC_ADDR_LEN],
        length_type: u16,
    ) -> Self {
        let mut bytes = [0u8; TX_CONTROL_BYTE_SIZE + ETH_HEADER_SIZE];
        bytes[0] = TX_CONTROL_DEFAULT;
        bytes[1..7].copy_from_slice(destination);
        bytes[7..13].copy_from_slice(source);
        bytes[13..15].copy_from_slice(&length_type.to_be_bytes());
        Self(bytes)
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_layout() {
        let prefix = TxPrefix::new(
            &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF],
            0x0800,
        );
        assert_eq!(
            prefix.as_bytes(),
            [
                0x00, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x08,
                0x00
            ]
        );
    }
}
