//! GPIO / peripheral pin assignments for the backlight board.
//!
//! Single source of truth: the config defaults and the firmware binary
//! reference this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// WS2812B data line
// ---------------------------------------------------------------------------

/// Push-pull output driving DIN of the first LED in the chain.
/// Needs a level shifter (or a 3.3 V tolerant first LED) on 5 V strips.
pub const LED_DATA_GPIO: i32 = 38;

// ---------------------------------------------------------------------------
// User button (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button: short press cycles colours, long press saves.
pub const BUTTON_GPIO: i32 = 0;
