//! Port traits — the boundary between backlight logic and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BacklightService / Ws2812Transmitter
//! ```
//!
//! Driven adapters (GPIO line, cycle counter, interrupt control, storage)
//! implement these traits. The service and the transmitter consume them via
//! generics, so tests substitute fakes and assert exact pin timing without
//! real hardware.

use crate::frame::PixelBuffer;

// ───────────────────────────────────────────────────────────────
// Timing source
// ───────────────────────────────────────────────────────────────

/// Free-running CPU cycle counter.
///
/// The counter wraps at `u32::MAX`; consumers compare wrapping differences,
/// never absolute values.
pub trait CycleCounter {
    /// Current counter value.
    fn cycles(&mut self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Preemption control
// ───────────────────────────────────────────────────────────────

/// Runs a closure with every interrupt and task switch excluded.
///
/// Entry and exit are paired inside `run`, so there is no way to leave the
/// section held.
pub trait AtomicSection {
    fn run<R>(&mut self, f: impl FnOnce() -> R) -> R;
}

// ───────────────────────────────────────────────────────────────
// Data line (driven adapter: transmitter → GPIO)
// ───────────────────────────────────────────────────────────────

/// The single GPIO feeding the LED chain.
///
/// Writes are infallible at this boundary: inside the critical section
/// there is nothing useful to do with an error, and on the target the
/// register writes cannot fail.
pub trait DataLine {
    /// (Re)configure as push-pull output, driven low.
    fn configure_output(&mut self);

    fn set_high(&mut self);

    fn set_low(&mut self);
}

// ───────────────────────────────────────────────────────────────
// LED output (driven adapter: service → strip)
// ───────────────────────────────────────────────────────────────

/// Pushes a finished frame to the LEDs.
pub trait LedOutput {
    fn write(&mut self, frame: &PixelBuffer);
}

// ───────────────────────────────────────────────────────────────
// Settings storage (driven adapter: domain ↔ file / flash)
// ───────────────────────────────────────────────────────────────

/// Raw storage for the single persisted settings record.
///
/// The record layout and version check live in
/// [`settings`](crate::settings); implementations only move bytes.
pub trait SettingsStorage {
    /// Read the stored record into `buf`. Returns the number of bytes read,
    /// which may be shorter or longer than expected (callers check).
    fn read(&self, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace the stored record with `data`.
    fn write(&mut self, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SettingsStorage`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Nothing has been stored yet.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for StorageError {}
