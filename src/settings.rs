//! Persisted colour preference.
//!
//! One fixed-size record per device. A record is trusted only when its
//! size and schema version both match; anything else leaves the compiled-in
//! default in place. The store loads lazily, at most once per boot.

use bytemuck::{Pod, Zeroable};
use log::{error, info, warn};

use crate::app::ports::SettingsStorage;
use crate::color;
use crate::error::SettingsError;

/// Bump when [`SettingsRecord`]'s layout or meaning changes.
pub const SETTINGS_VERSION: u32 = 5;

/// File name of the record inside the storage mount.
pub const SETTINGS_FILE_NAME: &str = ".rgb_backlight.settings";

/// On-storage layout. Native endianness: the same device writes and reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct SettingsRecord {
    pub version: u32,
    pub selected_color_index: u8,
    pub reserved: [u8; 3],
}

/// Size of one encoded record in bytes.
pub const RECORD_SIZE: usize = core::mem::size_of::<SettingsRecord>();

/// The user's backlight selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preference {
    pub schema_version: u32,
    pub selected_color_index: u8,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_VERSION,
            selected_color_index: 0,
        }
    }
}

impl From<Preference> for SettingsRecord {
    fn from(p: Preference) -> Self {
        Self {
            version: p.schema_version,
            selected_color_index: p.selected_color_index,
            reserved: [0; 3],
        }
    }
}

impl From<SettingsRecord> for Preference {
    fn from(r: SettingsRecord) -> Self {
        Self {
            schema_version: r.version,
            selected_color_index: r.selected_color_index,
        }
    }
}

/// Encode a preference as one record.
pub fn encode(preference: Preference) -> [u8; RECORD_SIZE] {
    bytemuck::cast(SettingsRecord::from(preference))
}

/// Decode and validate one record.
///
/// `bytes` must be exactly one record carrying [`SETTINGS_VERSION`].
pub fn decode(bytes: &[u8]) -> Result<Preference, SettingsError> {
    if bytes.len() != RECORD_SIZE {
        return Err(SettingsError::SizeMismatch {
            expected: RECORD_SIZE,
            found: bytes.len(),
        });
    }
    let record: SettingsRecord = bytemuck::pod_read_unaligned(bytes);
    if record.version != SETTINGS_VERSION {
        return Err(SettingsError::VersionMismatch {
            expected: SETTINGS_VERSION,
            found: record.version,
        });
    }
    Ok(record.into())
}

/// Read and validate the stored record, without touching any cached state.
pub fn read_preference(storage: &impl SettingsStorage) -> Result<Preference, SettingsError> {
    // One spare byte so an oversized record is detected rather than truncated.
    let mut buf = [0u8; RECORD_SIZE + 1];
    let n = storage.read(&mut buf)?;
    decode(&buf[..n.min(buf.len())])
}

/// Overwrite the stored record.
pub fn write_preference(
    storage: &mut impl SettingsStorage,
    preference: Preference,
) -> Result<(), SettingsError> {
    storage.write(&encode(preference))?;
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// PreferenceStore
// ───────────────────────────────────────────────────────────────

/// Lazily-loaded, in-memory copy of the persisted preference.
pub struct PreferenceStore<S: SettingsStorage> {
    storage: S,
    current: Preference,
    loaded: bool,
}

impl<S: SettingsStorage> PreferenceStore<S> {
    /// Starts from the compiled-in default; nothing is read until first use.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: Preference::default(),
            loaded: false,
        }
    }

    /// Whether a load has been attempted this boot.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current preference, loading it on first access.
    pub fn get(&mut self) -> Preference {
        if !self.loaded {
            self.reload();
        }
        self.current
    }

    /// Select a colour; out-of-range indices reset to 0. Returns the stored
    /// index.
    pub fn set_selected_color_index(&mut self, index: u8) -> u8 {
        if !self.loaded {
            self.reload();
        }
        let clamped = color::clamp_index(index);
        if clamped != index {
            warn!("Settings: colour index {} out of range, using 0", index);
        }
        self.current.selected_color_index = clamped;
        clamped
    }

    /// Load from storage, ignoring the load-once gate.
    ///
    /// On any failure the previous in-memory value is kept. Either way the
    /// store is marked loaded, so [`get`](Self::get) will not retry.
    pub fn reload(&mut self) -> Preference {
        info!("Settings: loading \"{}\"", SETTINGS_FILE_NAME);
        match read_preference(&self.storage) {
            Ok(mut loaded) => {
                let clamped = color::clamp_index(loaded.selected_color_index);
                if clamped != loaded.selected_color_index {
                    warn!(
                        "Settings: stored colour index {} out of range, using 0",
                        loaded.selected_color_index
                    );
                    loaded.selected_color_index = clamped;
                }
                info!("Settings: load success (colour={})", loaded.selected_color_index);
                self.current = loaded;
            }
            Err(e @ SettingsError::VersionMismatch { .. }) => {
                error!("Settings: {}, keeping defaults", e);
            }
            Err(e) => {
                error!("Settings: load failed, {}", e);
            }
        }
        self.loaded = true;
        self.current
    }

    /// Persist the current preference. In-memory state is unchanged on
    /// failure.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        info!("Settings: saving \"{}\"", SETTINGS_FILE_NAME);
        match write_preference(&mut self.storage, self.current) {
            Ok(()) => {
                info!("Settings: save success");
                Ok(())
            }
            Err(e) => {
                error!("Settings: save failed, {}", e);
                Err(e)
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
