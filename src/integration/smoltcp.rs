//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Implements `smoltcp::phy::Device` for [`Enc28j60`], so the chip can back a
//! smoltcp `Interface`.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use ph_enc28j60::integration::ethernet_address;
//!
//! let mut enc = Enc28j60::new(bus, delay, Enc28j60Config::new());
//! enc.init()?;
//!
//! let config = Config::new(ethernet_address(&enc).into());
//! let mut iface = Interface::new(config, &mut enc, smoltcp::time::Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//! ```
//!
//! # Token Ownership
//!
//! smoltcp wants an RX and a TX token from the same `receive()` call. The
//! frame is copied out of the receive ring before the tokens are built, so
//! the RX token owns its bytes and only the TX token borrows the driver.

use embedded_hal::delay::DelayNs;
use smoltcp::phy::{ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

use crate::driver::config::State;
use crate::driver::enc28j60::Enc28j60;
use crate::hal::bus::BusTransport;
use crate::internal::constants::{ETH_HEADER_SIZE, MAX_FRAME_SIZE, MTU};

// =============================================================================
// RX Token
// =============================================================================

/// Receive token holding one frame copied out of the receive ring
pub struct Enc28j60RxToken {
    buffer: [u8; MAX_FRAME_SIZE],
    len: usize,
}

impl smoltcp::phy::RxToken for Enc28j60RxToken {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(&self.buffer[..self.len])
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token borrowing the driver until the frame is staged
pub struct Enc28j60TxToken<'a, B, D> {
    enc: &'a mut Enc28j60<B, D>,
}

impl<B, D> smoltcp::phy::TxToken for Enc28j60TxToken<'_, B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(MAX_FRAME_SIZE);
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let result = f(&mut buffer[..len]);

        // smoltcp has no error path here; a lost frame is retried by the upper layers
        if let Err(_e) = self.enc.transmit_frame(&buffer[..len]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("smoltcp: transmit failed: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<B, D> Device for Enc28j60<B, D>
where
    B: BusTransport,
    D: DelayNs,
{
    type RxToken<'a>
        = Enc28j60RxToken
    where
        Self: 'a;
    type TxToken<'a>
        = Enc28j60TxToken<'a, B, D>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if self.state() != State::Running {
            return None;
        }

        let mut rx = Enc28j60RxToken {
            buffer: [0u8; MAX_FRAME_SIZE],
            len: 0,
        };
        // Bad frames are consumed by `receive`; the next poll picks up the one after
        rx.len = self.receive(&mut rx.buffer).ok()?;

        Some((rx, Enc28j60TxToken { enc: self }))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if self.state() != State::Running {
            return None;
        }
        Some(Enc28j60TxToken { enc: self })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        // smoltcp counts the Ethernet header in the MTU
        caps.max_transmission_unit = MTU + ETH_HEADER_SIZE;
        // One transmit buffer on chip
        caps.max_burst_size = Some(1);
        // The chip only generates the CRC; checksums stay in software
        caps.checksum = ChecksumCapabilities::default();
        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the configured MAC address as a smoltcp `EthernetAddress`
pub fn ethernet_address<B, D>(enc: &Enc28j60<B, D>) -> smoltcp::wire::EthernetAddress {
    smoltcp::wire::EthernetAddress(enc.mac_address())
}
