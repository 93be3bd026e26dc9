//! Hardware adapter — bridges real peripherals to the transmitter ports.
//!
//! | Type              | Implements      | Target                         |
//! |-------------------|-----------------|--------------------------------|
//! | `EspDataLine`     | `DataLine`      | ESP-IDF GPIO driver            |
//! | `CcountCounter`   | `CycleCounter`  | Xtensa CCOUNT special register |
//! | `HalDataLine`     | `DataLine`      | any `embedded-hal` output pin  |
//! | `InterruptFree`   | `AtomicSection` | `critical-section` impl        |
//! | `SimDataLine`     | `DataLine`      | host simulation                |
//! | `HostCycleCounter`| `CycleCounter`  | host simulation                |
//!
//! On ESP-IDF the `critical-section` implementation comes from esp-idf-hal
//! and masks interrupts on the current core, which also stops the FreeRTOS
//! tick and therefore task switches.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{AtomicSection, CycleCounter, DataLine};

// ── Preemption control ────────────────────────────────────────

/// Runs closures inside a `critical_section::with` block.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterruptFree;

impl AtomicSection for InterruptFree {
    fn run<R>(&mut self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}

// ── Generic embedded-hal line ─────────────────────────────────

/// Adapts any already-configured push-pull [`OutputPin`].
///
/// `configure_output` can only drive the pin low: `embedded-hal` has no
/// notion of pin mode, so the HAL that produced `P` owns the mode.
pub struct HalDataLine<P> {
    pin: P,
}

impl<P: OutputPin> HalDataLine<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DataLine for HalDataLine<P> {
    fn configure_output(&mut self) {
        let _ = self.pin.set_low();
    }

    fn set_high(&mut self) {
        let _ = self.pin.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
    }
}

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// WS2812B data line on a raw ESP-IDF GPIO.
#[cfg(target_os = "espidf")]
pub struct EspDataLine {
    gpio: i32,
}

#[cfg(target_os = "espidf")]
impl EspDataLine {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

#[cfg(target_os = "espidf")]
impl DataLine for EspDataLine {
    fn configure_output(&mut self) {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << self.gpio,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: the data line GPIO is owned exclusively by this adapter;
        // level is set low before and after switching to output mode.
        unsafe {
            gpio_set_level(self.gpio, 0);
            gpio_config(&cfg);
            gpio_set_drive_capability(self.gpio, gpio_drive_cap_t_GPIO_DRIVE_CAP_3);
            gpio_set_level(self.gpio, 0);
        }
    }

    #[inline(always)]
    fn set_high(&mut self) {
        // SAFETY: register write to an already-configured output pin.
        unsafe {
            gpio_set_level(self.gpio, 1);
        }
    }

    #[inline(always)]
    fn set_low(&mut self) {
        // SAFETY: register write to an already-configured output pin.
        unsafe {
            gpio_set_level(self.gpio, 0);
        }
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" {
    /// Xtensa HAL: current value of the CCOUNT register.
    fn xthal_get_ccount() -> u32;
}

/// Free-running CPU cycle counter of the current core.
#[cfg(target_os = "espidf")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CcountCounter;

#[cfg(target_os = "espidf")]
impl CycleCounter for CcountCounter {
    #[inline(always)]
    fn cycles(&mut self) -> u32 {
        // SAFETY: reads a per-core special register; no side effects.
        unsafe { xthal_get_ccount() }
    }
}

// ── Host simulation ───────────────────────────────────────────

/// Simulation data line: tracks the level and counts pulses.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimDataLine {
    high: bool,
    pulses: usize,
}

#[cfg(not(target_os = "espidf"))]
impl SimDataLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Rising edges seen so far.
    pub fn pulses(&self) -> usize {
        self.pulses
    }
}

#[cfg(not(target_os = "espidf"))]
impl DataLine for SimDataLine {
    fn configure_output(&mut self) {
        self.high = false;
    }

    fn set_high(&mut self) {
        if !self.high {
            self.pulses += 1;
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }
}

/// Simulated cycle counter derived from `std::time::Instant` at a nominal
/// clock rate.
#[cfg(not(target_os = "espidf"))]
pub struct HostCycleCounter {
    start: std::time::Instant,
    clock_hz: u32,
}

#[cfg(not(target_os = "espidf"))]
impl HostCycleCounter {
    pub fn new(clock_hz: u32) -> Self {
        Self {
            start: std::time::Instant::now(),
            clock_hz,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl CycleCounter for HostCycleCounter {
    fn cycles(&mut self) -> u32 {
        let ns = self.start.elapsed().as_nanos();
        // Truncation is the wrap of a 32-bit hardware counter.
        (ns * u128::from(self.clock_hz) / 1_000_000_000) as u32
    }
}
