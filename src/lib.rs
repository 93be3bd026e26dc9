//! RGB backlight firmware library.
//!
//! Drives a short WS2812B chain from a bit-banged GPIO and remembers the
//! user's colour choice across reboots. Exposes the pure-logic modules for
//! integration testing; all ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod color;
pub mod config;
pub mod drivers;
pub mod error;
pub mod frame;
pub mod pins;
pub mod settings;

pub use app::ports::{AtomicSection, CycleCounter, DataLine, LedOutput, SettingsStorage};
pub use app::service::{BacklightService, UpdateOutcome};
pub use color::{COLORS, Color};
pub use config::BacklightConfig;
pub use drivers::ws2812::{TimingProfile, Ws2812Transmitter};
pub use frame::{LED_COUNT, PixelBuffer};
pub use settings::{Preference, SETTINGS_VERSION};
