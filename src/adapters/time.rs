//! Millisecond uptime for the button poll loop.
//!
//! On the device this reads the ESP-IDF high-resolution timer; on the host
//! it measures from construction with `Instant`. Either way the value is
//! truncated to `u32` and callers compare wrapping differences.

#[cfg(not(target_os = "espidf"))]
use std::time::Instant;

/// Monotonic millisecond clock.
#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    #[cfg(not(target_os = "espidf"))]
    origin: Instant,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since boot; wraps after ~49 days.
    #[cfg(target_os = "espidf")]
    pub fn now_ms(&self) -> u32 {
        // SAFETY: read-only query of the esp_timer counter.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        (us / 1_000) as u32
    }

    /// Milliseconds since construction; wraps after ~49 days.
    #[cfg(not(target_os = "espidf"))]
    pub fn now_ms(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }
}
