//! Error types for the ENC28J60 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Invalid configuration passed to `init`
//! - [`BusError`]: The SPI transport failed an exchange or chip-select change
//! - [`RegisterError`]: Register identifiers and diagnostic mismatches
//! - [`IoError`]: Runtime TX/RX and polling failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Reported by [`Enc28j60Config::validate`](super::config::Enc28j60Config::validate)
/// before any register is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Receive region start is after its end, or beyond packet memory
    InvalidRxRegion,
    /// Receive region end address is even (errata requires an odd RXEND)
    EvenRxEnd,
    /// Transmit region start is after its end, or beyond packet memory
    InvalidTxRegion,
    /// Receive and transmit regions share addresses
    RegionOverlap,
    /// Maximum frame length outside the supported range
    InvalidFrameLength,
    /// MAC address is multicast or all zeros
    InvalidMacAddress,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidRxRegion => "invalid receive region",
            ConfigError::EvenRxEnd => "receive region end must be odd",
            ConfigError::InvalidTxRegion => "invalid transmit region",
            ConfigError::RegionOverlap => "receive and transmit regions overlap",
            ConfigError::InvalidFrameLength => "invalid maximum frame length",
            ConfigError::InvalidMacAddress => "invalid MAC address",
        }
    }
}

// =============================================================================
// Bus Errors
// =============================================================================

/// SPI transport errors
///
/// The bus is assumed wedged after any of these; the driver never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The full-duplex exchange failed
    Transfer,
    /// Driving the chip-select line failed
    ChipSelect,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BusError::Transfer => "SPI transfer failed",
            BusError::ChipSelect => "chip select failed",
        }
    }
}

// =============================================================================
// Register Errors
// =============================================================================

/// Register addressing and verification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Identifier does not map to a bank in 0-3 or an address in 0x00-0x1F
    InvalidRegister,
    /// Bit-field set/clear requested on a MAC or MII register
    BitFieldUnsupported,
    /// A diagnostic write did not read back identically
    TestMismatch,
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RegisterError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegisterError::InvalidRegister => "invalid register",
            RegisterError::BitFieldUnsupported => "bit-field operation on MAC/MII register",
            RegisterError::TestMismatch => "read-back mismatch",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime TX/RX errors
///
/// These errors occur during frame transmission, reception or while
/// waiting on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// A polling loop exceeded its configured bound
    Timeout,
    /// Invalid state for operation (e.g., not initialized)
    InvalidState,
    /// The MAC aborted the last transmission
    TransmitAborted,
    /// No received packet is waiting in the ring
    NoPacketPending,
    /// Received frame has status errors (CRC, length, ...)
    FrameError,
    /// Receive status header points outside the receive region
    CorruptHeader,
    /// Frame does not fit the transmit region or the maximum frame length
    FrameTooLarge,
    /// Caller buffer too small for the requested operation
    BufferTooSmall,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "operation timed out",
            IoError::InvalidState => "invalid state for operation",
            IoError::TransmitAborted => "transmission aborted",
            IoError::NoPacketPending => "no packet pending",
            IoError::FrameError => "frame error",
            IoError::CorruptHeader => "corrupt receive status header",
            IoError::FrameTooLarge => "frame too large",
            IoError::BufferTooSmall => "buffer too small",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Bus(_)) => { /* reset the chip */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     Err(Error::Io(IoError::TransmitAborted)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// SPI transport error
    Bus(BusError),
    /// Register error
    Register(RegisterError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Bus(e) => write!(f, "bus: {}", e.as_str()),
            Error::Register(e) => write!(f, "register: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Bus(e)
    }
}

impl From<RegisterError> for Error {
    fn from(e: RegisterError) -> Self {
        Error::Register(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for transport operations
pub type BusResult<T> = core::result::Result<T, BusError>;

/// Result type alias for register identifier operations
pub type RegisterResult<T> = core::result::Result<T, RegisterError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
