//! Colour button: debounced, polled, with short and long press.
//!
//! ## Hardware
//!
//! Active-low momentary switch to ground, internal pull-up. The firmware
//! samples the pin every loop iteration and hands the level to
//! [`ColorButton::poll`]. There is no GPIO interrupt, so nothing can fire
//! while the LED frame is being bit-banged.
//!
//! ## Gestures
//!
//! | Gesture | Condition                              | Event        |
//! |---------|----------------------------------------|--------------|
//! | Short   | Held past debounce, released before 2s | `ShortPress` |
//! | Long    | Held for 2s (reported while held)      | `LongPress`  |

/// Minimum stable press before it counts.
pub const DEBOUNCE_MS: u32 = 50;
/// Hold time that turns a press into a long press.
pub const LONG_PRESS_MS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Step to the next colour.
    ShortPress,
    /// Persist the current colour.
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Released,
    Settling { down_at: u32 },
    Held { down_at: u32 },
    /// Long press reported; swallow the release.
    Spent,
}

/// Press classifier for the colour button.
#[derive(Debug)]
pub struct ColorButton {
    phase: Phase,
}

impl Default for ColorButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorButton {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Released,
        }
    }

    /// Feed one sample. `now_ms` is a wrapping millisecond clock, `down`
    /// the raw logical level (true while pressed).
    pub fn poll(&mut self, now_ms: u32, down: bool) -> Option<ButtonEvent> {
        let (next, event) = match (self.phase, down) {
            (Phase::Released, true) => (Phase::Settling { down_at: now_ms }, None),
            (Phase::Released, false) => (Phase::Released, None),

            // Released inside the debounce window: contact bounce.
            (Phase::Settling { .. }, false) => (Phase::Released, None),
            (Phase::Settling { down_at }, true) => {
                if now_ms.wrapping_sub(down_at) >= DEBOUNCE_MS {
                    (Phase::Held { down_at }, None)
                } else {
                    (Phase::Settling { down_at }, None)
                }
            }

            (Phase::Held { down_at }, _) if now_ms.wrapping_sub(down_at) >= LONG_PRESS_MS => {
                (Phase::Spent, Some(ButtonEvent::LongPress))
            }
            (Phase::Held { .. }, false) => (Phase::Released, Some(ButtonEvent::ShortPress)),
            (Phase::Held { down_at }, true) => (Phase::Held { down_at }, None),

            (Phase::Spent, false) => (Phase::Released, None),
            (Phase::Spent, true) => (Phase::Spent, None),
        };
        self.phase = next;
        event
    }
}
