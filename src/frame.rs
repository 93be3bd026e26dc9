//! Pixel buffer in WS2812B wire order.
//!
//! The chip expects each LED's three bytes as green, red, blue, not RGB.
//! The buffer stores slots already in that order so the transmitter can
//! stream bytes straight out without reshuffling inside the critical
//! section.

use crate::color::Color;

/// Number of LEDs on the backlight board.
pub const LED_COUNT: usize = 3;

/// Bytes per LED slot.
pub const CHANNELS: usize = 3;

/// One LED slot: `[green, red, blue]`.
pub type Grb = [u8; CHANNELS];

/// Scale one channel by `brightness / 255`, truncating.
pub const fn scale_channel(value: u8, brightness: u8) -> u8 {
    // Max product 255 * 255 fits in u16; the quotient is <= 255.
    ((value as u16 * brightness as u16) / 255) as u8
}

/// Wire-order slot for `color` at `brightness`.
pub const fn grb(color: &Color, brightness: u8) -> Grb {
    [
        scale_channel(color.green, brightness),
        scale_channel(color.red, brightness),
        scale_channel(color.blue, brightness),
    ]
}

/// Fixed-size frame, derived from the selected colour and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBuffer {
    slots: [Grb; LED_COUNT],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    /// All LEDs off.
    pub const fn new() -> Self {
        Self {
            slots: [[0; CHANNELS]; LED_COUNT],
        }
    }

    /// Overwrite every slot with `color` scaled by `brightness`.
    pub fn fill(&mut self, color: &Color, brightness: u8) {
        let slot = grb(color, brightness);
        for s in &mut self.slots {
            *s = slot;
        }
    }

    /// Wire-order slots, one per LED.
    pub fn slots(&self) -> &[Grb; LED_COUNT] {
        &self.slots
    }

    /// Bytes in transmission order (LED 0 green first).
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().flatten().copied()
    }
}
