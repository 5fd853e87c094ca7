//! Synchronization Support
//!
//! This module provides synchronization primitives and concurrency-safe wrappers
//! for the ENC28J60 driver. It includes:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] - ISR-safe interior mutability
//! - **Shared Wrappers** (`shared`): [`SharedEnc28j60`] - critical-section protected driver slot
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::sync::SharedEnc28j60;
//!
//! static ENC: SharedEnc28j60<MyBus, MyDelay> = SharedEnc28j60::new();
//!
//! #[interrupt]
//! fn EXTI0() {
//!     ENC.with(|enc| {
//!         // Safe access from ISR
//!         if let Ok(status) = enc.interrupt_status() {
//!             let _ = enc.clear_interrupts(status);
//!         }
//!     });
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedEnc28j60;
