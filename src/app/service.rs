//! Application service — the hexagonal core.
//!
//! [`BacklightService`] owns the preference store, the pixel buffer, and
//! the last-sent memo. It exposes the query surface the surrounding
//! firmware uses; the LED output is injected per call so the same service
//! drives real hardware or a recording mock.
//!
//! ```text
//!  SettingsStorage ◀──▶ ┌────────────────────────┐ ──▶ LedOutput
//!                       │   BacklightService     │
//!                       │ colour · memo · frame  │
//!                       └────────────────────────┘
//! ```

use log::{debug, info};

use crate::color::{self, COLORS};
use crate::error::SettingsError;
use crate::frame::PixelBuffer;
use crate::settings::{Preference, PreferenceStore};

use super::ports::{LedOutput, SettingsStorage};

/// What [`BacklightService::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The frame was recomputed and sent.
    Transmitted,
    /// Same brightness and colour as the last frame; nothing was sent.
    Unchanged,
}

/// Inputs of the last transmitted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastSent {
    brightness: u8,
    color_index: u8,
}

// ───────────────────────────────────────────────────────────────
// BacklightService
// ───────────────────────────────────────────────────────────────

pub struct BacklightService<S: SettingsStorage> {
    preferences: PreferenceStore<S>,
    frame: PixelBuffer,
    /// `None` until the first frame, so the first update always sends.
    last_sent: Option<LastSent>,
}

impl<S: SettingsStorage> BacklightService<S> {
    /// Nothing is read from `storage` until the selection is first needed.
    pub fn new(storage: S) -> Self {
        Self {
            preferences: PreferenceStore::new(storage),
            frame: PixelBuffer::new(),
            last_sent: None,
        }
    }

    // ── Colour table ──────────────────────────────────────────

    pub fn color_count(&self) -> usize {
        color::color_count()
    }

    /// Name of the colour at `index`; `None` past the end of the table.
    pub fn color_name(&self, index: u8) -> Option<&'static str> {
        color::color_name(index)
    }

    // ── Selection ─────────────────────────────────────────────

    /// Currently selected colour index, loading the stored preference on
    /// first use.
    pub fn selected_color(&mut self) -> u8 {
        self.preferences.get().selected_color_index
    }

    /// Select a colour. Out-of-range indices reset to 0; the index actually
    /// stored is returned. Does not touch the LEDs or storage.
    pub fn set_selected_color(&mut self, index: u8) -> u8 {
        self.preferences.set_selected_color_index(index)
    }

    pub fn preference(&mut self) -> Preference {
        self.preferences.get()
    }

    // ── Output ────────────────────────────────────────────────

    /// Recompute the frame for `brightness` and the selected colour and
    /// send it, unless both match the previous frame.
    pub fn update(&mut self, brightness: u8, output: &mut impl LedOutput) -> UpdateOutcome {
        let color_index = self.selected_color();
        let request = LastSent {
            brightness,
            color_index,
        };
        if self.last_sent == Some(request) {
            return UpdateOutcome::Unchanged;
        }
        self.last_sent = Some(request);

        // The store already clamps; the fallback only guards the lookup.
        let selected = color::color(color_index).unwrap_or(&COLORS[0]);
        self.frame.fill(selected, brightness);
        debug!(
            "Backlight: {} @ {} -> {:?}",
            selected.name,
            brightness,
            self.frame.slots()[0]
        );

        output.write(&self.frame);
        UpdateOutcome::Transmitted
    }

    /// Most recently computed frame.
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    // ── Persistence ───────────────────────────────────────────

    /// Persist the current selection. Failures are logged and returned;
    /// the in-memory selection is kept either way.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        let index = self.selected_color();
        info!(
            "Backlight: saving selection {} ({})",
            index,
            self.color_name(index).unwrap_or("?")
        );
        self.preferences.save()
    }

    /// Re-read storage regardless of the load-once gate.
    pub fn reload(&mut self) -> Preference {
        self.preferences.reload()
    }

    pub fn storage(&self) -> &S {
        self.preferences.storage()
    }
}
