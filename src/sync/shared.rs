//! ISR-safe driver wrapper using critical sections.
//!
//! Provides [`SharedEnc28j60`], a slot that can live in a `static` and be
//! filled once the bus and delay exist.

use super::primitives::CriticalSectionCell;
use crate::driver::enc28j60::Enc28j60;

/// ISR-safe ENC28J60 wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. Starts empty; [`install`](Self::install)
/// the driver after construction.
///
/// # Example
///
/// ```ignore
/// static ENC: SharedEnc28j60<Bus, Delay> = SharedEnc28j60::new();
///
/// let mut enc = Enc28j60::new(bus, delay, Enc28j60Config::new());
/// enc.init()?;
/// ENC.install(enc);
///
/// // Interrupt handler on the INT pin
/// ENC.with(|enc| {
///     let status = enc.interrupt_status()?;
///     enc.clear_interrupts(status)
/// });
/// ```
pub struct SharedEnc28j60<B, D> {
    inner: CriticalSectionCell<Option<Enc28j60<B, D>>>,
}

impl<B, D> SharedEnc28j60<B, D> {
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Store a driver, returning the one it replaces.
    pub fn install(&self, driver: Enc28j60<B, D>) -> Option<Enc28j60<B, D>> {
        self.inner.with(|slot| slot.replace(driver))
    }

    /// Remove the driver.
    pub fn take(&self) -> Option<Enc28j60<B, D>> {
        self.inner.with(Option::take)
    }

    /// Check whether a driver is installed.
    pub fn is_installed(&self) -> bool {
        self.inner.with_ref(Option::is_some)
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Returns `None` when no driver is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<B, D>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if already borrowed or empty.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<B, D>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }
}

impl<B, D> Default for SharedEnc28j60<B, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::{Enc28j60Config, State};
    use crate::test_utils::{MockDelay, MockEnc28j60, ready_driver};

    type Shared = SharedEnc28j60<MockEnc28j60, MockDelay>;

    #[test]
    fn empty_slot() {
        let shared = Shared::new();
        assert!(!shared.is_installed());
        assert_eq!(shared.with(|enc| enc.state()), None);
        assert!(shared.take().is_none());
    }

    #[test]
    fn install_and_use() {
        let shared = Shared::default();
        assert!(shared.install(ready_driver(Enc28j60Config::new())).is_none());
        assert!(shared.is_installed());

        assert_eq!(shared.with(|enc| enc.state()), Some(State::Running));
        let revision = shared.with(|enc| enc.revision()).unwrap();
        assert_eq!(revision, Ok(0x06));
        assert_eq!(shared.try_with(|enc| enc.pending_packets().unwrap()), Some(0));
    }

    #[test]
    fn try_with_inside_with_is_refused() {
        let shared = Shared::new();
        shared.install(ready_driver(Enc28j60Config::new()));
        let nested = shared.with(|_| shared.try_with(|enc| enc.state()));
        assert_eq!(nested, Some(None));
    }

    #[test]
    fn take_returns_driver() {
        let shared = Shared::new();
        shared.install(ready_driver(Enc28j60Config::new()));
        let enc = shared.take().unwrap();
        assert_eq!(enc.state(), State::Running);
        assert!(!shared.is_installed());
    }
}
