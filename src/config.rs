//! Backlight configuration parameters
//!
//! Board- and clock-specific values. Defaults match the ESP32-S3 board; any
//! subset can be overridden by a JSON document on the storage mount.

use serde::{Deserialize, Serialize};

use crate::drivers::ws2812::TimingProfile;
use crate::error::ConfigError;
use crate::pins;
use crate::settings::SETTINGS_FILE_NAME;

/// Mount point of the SPIFFS partition on the device.
pub const STORAGE_MOUNT: &str = "/spiffs";

/// Core backlight configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacklightConfig {
    // --- Timing ---
    /// Rate at which the CPU cycle counter advances (Hz)
    pub cpu_clock_hz: u32,
    /// Cycles consumed by one GPIO level write, taken off every pulse phase
    pub pin_write_overhead_cycles: u32,

    // --- Pins ---
    /// WS2812B data output
    pub data_gpio: i32,
    /// Colour / save button input (active low)
    pub button_gpio: i32,

    // --- Behaviour ---
    /// Brightness applied at boot and on every colour change (0-255)
    pub brightness: u8,
    /// Where the selection record lives
    pub settings_path: String,
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self {
            // Timing
            cpu_clock_hz: 240_000_000, // ESP32-S3 max CPU clock
            pin_write_overhead_cycles: 12,

            // Pins
            data_gpio: pins::LED_DATA_GPIO,
            button_gpio: pins::BUTTON_GPIO,

            // Behaviour
            brightness: 255,
            settings_path: format!("{STORAGE_MOUNT}/{SETTINGS_FILE_NAME}"),
        }
    }
}

impl BacklightConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(8_000_000..=1_000_000_000).contains(&self.cpu_clock_hz) {
            return Err(ConfigError::ValidationFailed(
                "cpu_clock_hz must be 8 MHz–1 GHz",
            ));
        }
        // The shortest phase (T0H) must keep at least one cycle of spin.
        let profile = TimingProfile::from_clock(self.cpu_clock_hz, 0);
        if self.pin_write_overhead_cycles >= profile.t0h {
            return Err(ConfigError::ValidationFailed(
                "pin_write_overhead_cycles must be shorter than T0H",
            ));
        }
        if !(0..=48).contains(&self.data_gpio) {
            return Err(ConfigError::ValidationFailed("data_gpio must be 0–48"));
        }
        if !(0..=48).contains(&self.button_gpio) {
            return Err(ConfigError::ValidationFailed("button_gpio must be 0–48"));
        }
        if self.data_gpio == self.button_gpio {
            return Err(ConfigError::ValidationFailed(
                "data_gpio and button_gpio must differ",
            ));
        }
        if self.settings_path.is_empty() {
            return Err(ConfigError::ValidationFailed("settings_path must be set"));
        }
        Ok(())
    }

    /// Transmitter timing for this clock and pin overhead.
    pub fn timing_profile(&self) -> TimingProfile {
        TimingProfile::from_clock(self.cpu_clock_hz, self.pin_write_overhead_cycles)
    }
}
