//! Configuration types for the ENC28J60 driver

use crate::driver::error::{ConfigError, ConfigResult};
use crate::driver::ring::BufferLayout;
use crate::internal::constants::{
    BACK_TO_BACK_GAP_FULL, BACK_TO_BACK_GAP_HALF, CRC_SIZE, DEFAULT_CLOCK_READY_TIMEOUT_US,
    DEFAULT_LED_CONFIG, DEFAULT_MAC_ADDR, DEFAULT_MII_TIMEOUT_US, DEFAULT_RX_END, DEFAULT_RX_START,
    DEFAULT_SETTLE_NS, DEFAULT_TX_END, DEFAULT_TX_START, DEFAULT_TX_TIMEOUT_US, MAC_ADDR_LEN,
    MAX_FRAME_SIZE, MIN_FRAME_SIZE, NON_BACK_TO_BACK_GAP_HIGH, NON_BACK_TO_BACK_GAP_LOW,
};
use crate::internal::register::bits::erxfcon;

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// How the usable length of a received frame is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveLengthPolicy {
    /// Chip-reported byte count minus the 4-byte CRC
    #[default]
    ByteCount,
    /// Length derived from the length/type field: IPv4 frames report 64 + 14
    /// bytes, anything else reports the field value + 14. Kept for peers that
    /// depend on the legacy behavior; it ignores the chip byte count.
    EtherTypeCompat,
}

/// CLKOUT pin divider (ECOCON)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockOut {
    /// CLKOUT driven low
    Disabled = 0,
    /// 25 MHz
    Div1 = 1,
    /// 12.5 MHz
    Div2 = 2,
    /// 8.333 MHz
    Div3 = 3,
    /// 6.25 MHz (reset value)
    #[default]
    Div4 = 4,
    /// 3.125 MHz
    Div8 = 5,
}

impl ClockOut {
    /// ECOCON register value
    pub const fn to_reg_value(self) -> u8 {
        self as u8
    }
}

/// Receive filter selection (ERXFCON)
///
/// With every filter disabled the chip accepts all frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxFilter {
    /// Accept unicast frames addressed to our MAC
    pub unicast: bool,
    /// Accept multicast frames
    pub multicast: bool,
    /// Accept broadcast frames
    pub broadcast: bool,
    /// Discard frames with an invalid CRC
    pub crc_check: bool,
    /// Require all enabled filters to match instead of any
    pub and_mode: bool,
}

impl Default for RxFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl RxFilter {
    /// Unicast + broadcast with CRC checking
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unicast: true,
            multicast: false,
            broadcast: true,
            crc_check: true,
            and_mode: false,
        }
    }

    /// Accept every frame
    #[must_use]
    pub const fn promiscuous() -> Self {
        Self {
            unicast: false,
            multicast: false,
            broadcast: false,
            crc_check: false,
            and_mode: false,
        }
    }

    /// Enable or disable multicast acceptance
    #[must_use]
    pub const fn with_multicast(mut self, enabled: bool) -> Self {
        self.multicast = enabled;
        self
    }

    /// ERXFCON register value
    pub const fn to_bits(&self) -> u8 {
        let mut bits = 0;
        if self.unicast {
            bits |= erxfcon::UCEN;
        }
        if self.and_mode {
            bits |= erxfcon::ANDOR;
        }
        if self.crc_check {
            bits |= erxfcon::CRCEN;
        }
        if self.multicast {
            bits |= erxfcon::MCEN;
        }
        if self.broadcast {
            bits |= erxfcon::BCEN;
        }
        bits
    }
}

/// Inter-packet gap timing (MABBIPG, MAIPGL, MAIPGH)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterPacketGap {
    /// Back-to-back gap
    pub back_to_back: u8,
    /// Non-back-to-back gap, low byte
    pub non_back_to_back_low: u8,
    /// Non-back-to-back gap, high byte (only written in half duplex)
    pub non_back_to_back_high: u8,
}

impl InterPacketGap {
    /// Recommended 9.6 µs gaps for the given duplex
    #[must_use]
    pub const fn for_duplex(duplex: Duplex) -> Self {
        let back_to_back = match duplex {
            Duplex::Full => BACK_TO_BACK_GAP_FULL,
            Duplex::Half => BACK_TO_BACK_GAP_HALF,
        };
        Self {
            back_to_back,
            non_back_to_back_low: NON_BACK_TO_BACK_GAP_LOW,
            non_back_to_back_high: NON_BACK_TO_BACK_GAP_HIGH,
        }
    }
}

/// ENC28J60 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Enc28j60Config {
    /// MAC address (6 bytes)
    pub mac_address: [u8; MAC_ADDR_LEN],
    /// Packet memory split
    pub layout: BufferLayout,
    /// Receive filter
    pub rx_filter: RxFilter,
    /// Duplex mode (MAC and PHY)
    pub duplex: Duplex,
    /// Maximum frame length accepted or sent, CRC included
    pub max_frame_length: u16,
    /// Inter-packet gaps
    pub inter_packet_gap: InterPacketGap,
    /// Received length derivation
    pub receive_length: ReceiveLengthPolicy,
    /// Raw PHLCON value
    pub led_config: u16,
    /// Enable chip interrupts (INT pin) for packet, transmit and error events
    pub interrupts: bool,
    /// Pulse ECON1.TXRST before every transmission (errata workaround)
    pub tx_reset_workaround: bool,
    /// Chip-select idle time after each transaction, in nanoseconds
    pub settle_ns: u32,
    /// MII busy timeout in microseconds
    pub mii_timeout_us: u32,
    /// Transmit completion timeout in microseconds
    pub tx_timeout_us: u32,
    /// Oscillator start-up timeout after reset, in microseconds
    pub clock_ready_timeout_us: u32,
}

impl Default for Enc28j60Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Enc28j60Config {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            layout: BufferLayout::new(
                DEFAULT_RX_START,
                DEFAULT_RX_END,
                DEFAULT_TX_START,
                DEFAULT_TX_END,
            ),
            rx_filter: RxFilter::new(),
            duplex: Duplex::Full,
            max_frame_length: MAX_FRAME_SIZE as u16,
            inter_packet_gap: InterPacketGap::for_duplex(Duplex::Full),
            receive_length: ReceiveLengthPolicy::ByteCount,
            led_config: DEFAULT_LED_CONFIG,
            interrupts: true,
            tx_reset_workaround: false,
            settle_ns: DEFAULT_SETTLE_NS,
            mii_timeout_us: DEFAULT_MII_TIMEOUT_US,
            tx_timeout_us: DEFAULT_TX_TIMEOUT_US,
            clock_ready_timeout_us: DEFAULT_CLOCK_READY_TIMEOUT_US,
        }
    }

    /// Check the configuration before it is written to the chip
    pub const fn validate(&self) -> ConfigResult<()> {
        if let Err(e) = self.layout.validate() {
            return Err(e);
        }
        let min = (MIN_FRAME_SIZE + CRC_SIZE) as u16;
        if self.max_frame_length < min || self.max_frame_length > MAX_FRAME_SIZE as u16 {
            return Err(ConfigError::InvalidFrameLength);
        }
        let mac = self.mac_address;
        let all_zero =
            mac[0] == 0 && mac[1] == 0 && mac[2] == 0 && mac[3] == 0 && mac[4] == 0 && mac[5] == 0;
        if all_zero || mac[0] & 0x01 != 0 {
            return Err(ConfigError::InvalidMacAddress);
        }
        Ok(())
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the MAC address
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the packet memory layout
    #[must_use]
    pub const fn with_layout(mut self, layout: BufferLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the receive filter
    #[must_use]
    pub const fn with_rx_filter(mut self, filter: RxFilter) -> Self {
        self.rx_filter = filter;
        self
    }

    /// Set the duplex mode
    ///
    /// Also resets the inter-packet gaps to the recommended values for that
    /// mode; call [`with_inter_packet_gap`](Self::with_inter_packet_gap)
    /// afterwards to override them.
    #[must_use]
    pub const fn with_duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self.inter_packet_gap = InterPacketGap::for_duplex(duplex);
        self
    }

    /// Set the maximum frame length (CRC included)
    #[must_use]
    pub const fn with_max_frame_length(mut self, length: u16) -> Self {
        self.max_frame_length = length;
        self
    }

    /// Set the inter-packet gaps
    #[must_use]
    pub const fn with_inter_packet_gap(mut self, gap: InterPacketGap) -> Self {
        self.inter_packet_gap = gap;
        self
    }

    /// Set the received length policy
    #[must_use]
    pub const fn with_receive_length(mut self, policy: ReceiveLengthPolicy) -> Self {
        self.receive_length = policy;
        self
    }

    /// Set the raw PHLCON value
    #[must_use]
    pub const fn with_led_config(mut self, phlcon: u16) -> Self {
        self.led_config = phlcon;
        self
    }

    /// Enable or disable chip interrupts
    #[must_use]
    pub const fn with_interrupts(mut self, enabled: bool) -> Self {
        self.interrupts = enabled;
        self
    }

    /// Enable or disable the transmit logic reset before each frame
    #[must_use]
    pub const fn with_tx_reset_workaround(mut self, enabled: bool) -> Self {
        self.tx_reset_workaround = enabled;
        self
    }

    /// Set the chip-select settle time
    #[must_use]
    pub const fn with_settle_ns(mut self, settle_ns: u32) -> Self {
        self.settle_ns = settle_ns;
        self
    }

    /// Set the MII busy timeout
    #[must_use]
    pub const fn with_mii_timeout_us(mut self, timeout_us: u32) -> Self {
        self.mii_timeout_us = timeout_us;
        self
    }

    /// Set the transmit completion timeout
    #[must_use]
    pub const fn with_tx_timeout_us(mut self, timeout_us: u32) -> Self {
        self.tx_timeout_us = timeout_us;
        self
    }

    /// Set the oscillator start-up timeout
    #[must_use]
    pub const fn with_clock_ready_timeout_us(mut self, timeout_us: u32) -> Self {
        self.clock_ready_timeout_us = timeout_us;
        self
    }
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized
    #[default]
    Uninitialized,
    /// Initialized, reception enabled
    Running,
    /// Initialized, reception disabled
    Stopped,
}

// =============================================================================
// Unit Tests
// =============================================================================
