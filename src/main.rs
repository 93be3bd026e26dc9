//! RGB Backlight Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  EspDataLine  CcountCounter  InterruptFree  FileStorage  │
//! │  (DataLine)   (CycleCounter) (AtomicSection) (Settings)  │
//! │                                                          │
//! │  ───────────────── Port Trait Boundary ───────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ BacklightService ──▶ Ws2812Transmitter             │  │
//! │  │ colour · memo · frame    bit timing · IRQ blackout │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  ColorButton (short = next colour, long = save)          │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::sys::*;
use log::{info, warn};

use rgb_backlight::adapters::hardware::{CcountCounter, EspDataLine, InterruptFree};
use rgb_backlight::adapters::storage::FileStorage;
use rgb_backlight::adapters::time::UptimeClock;
use rgb_backlight::app::service::BacklightService;
use rgb_backlight::config::BacklightConfig;
use rgb_backlight::drivers::button::{ButtonEvent, ColorButton};
use rgb_backlight::drivers::ws2812::Ws2812Transmitter;

/// Optional JSON override of [`BacklightConfig`].
const CONFIG_PATH: &str = "/spiffs/backlight.json";
/// Button poll period.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    link_patches();
    esp_idf_logger::init()?;
    info!("RGB Backlight v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Storage + config ───────────────────────────────────
    if let Err(rc) = mount_storage() {
        // Keep running: the LEDs work, the selection just won't persist.
        warn!("SPIFFS mount failed (rc={}), running without persistence", rc);
    }
    let config = load_config();

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(rc) = init_button(config.button_gpio) {
        warn!("Button GPIO config failed (rc={}), colour fixed", rc);
    }
    let timing = config.timing_profile();
    info!(
        "WS2812B: GPIO{} @ {} Hz, cycles T0H={} T0L={} T1H={} T1L={}",
        config.data_gpio,
        config.cpu_clock_hz,
        timing.t0h,
        timing.t0l,
        timing.t1h,
        timing.t1l
    );
    let mut strip = Ws2812Transmitter::new(
        EspDataLine::new(config.data_gpio),
        CcountCounter,
        InterruptFree,
        timing,
    );

    // ── 4. Restore the saved colour ───────────────────────────
    let mut backlight = BacklightService::new(FileStorage::new(&config.settings_path));
    let selected = backlight.selected_color();
    info!(
        "Backlight: colour {} ({})",
        selected,
        backlight.color_name(selected).unwrap_or("?")
    );
    backlight.update(config.brightness, &mut strip);

    // ── 5. Event loop ─────────────────────────────────────────
    let clock = UptimeClock::new();
    let mut button = ColorButton::new();
    loop {
        // SAFETY: register read of a configured input pin.
        let pressed = unsafe { gpio_get_level(config.button_gpio) } == 0;

        match button.poll(clock.now_ms(), pressed) {
            Some(ButtonEvent::ShortPress) => {
                // Stepping past the last entry clamps back to the first.
                let current = backlight.selected_color();
                let next = backlight.set_selected_color(current.wrapping_add(1));
                info!(
                    "Backlight: colour {} ({})",
                    next,
                    backlight.color_name(next).unwrap_or("?")
                );
                backlight.update(config.brightness, &mut strip);
            }
            Some(ButtonEvent::LongPress) => {
                if backlight.save().is_err() {
                    warn!("Backlight: selection kept in RAM only");
                }
            }
            None => {}
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Read [`CONFIG_PATH`] if present; defaults on any error.
fn load_config() -> BacklightConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(json) => match BacklightConfig::from_json(&json) {
            Ok(cfg) => {
                info!("Config loaded from {}", CONFIG_PATH);
                cfg
            }
            Err(e) => {
                warn!("Config {} rejected ({}), using defaults", CONFIG_PATH, e);
                BacklightConfig::default()
            }
        },
        Err(_) => {
            info!("No {}, using defaults", CONFIG_PATH);
            BacklightConfig::default()
        }
    }
}

/// Register the SPIFFS partition under `/spiffs`.
fn mount_storage() -> Result<(), esp_err_t> {
    let conf = esp_vfs_spiffs_conf_t {
        base_path: c"/spiffs".as_ptr(),
        partition_label: core::ptr::null(),
        max_files: 2,
        format_if_mount_failed: true,
    };
    // SAFETY: called once from main before any file access; `conf` and the
    // base path literal outlive the call.
    let ret = unsafe { esp_vfs_spiffs_register(&conf) };
    if ret != ESP_OK as esp_err_t {
        return Err(ret);
    }
    info!("SPIFFS mounted at /spiffs");
    Ok(())
}

/// Button input with pull-up, no interrupt (polled).
fn init_button(gpio: i32) -> Result<(), esp_err_t> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << gpio,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: single-threaded init path; the button pin is not shared.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as esp_err_t {
        return Err(ret);
    }
    Ok(())
}
