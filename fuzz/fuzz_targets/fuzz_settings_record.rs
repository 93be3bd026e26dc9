//! Fuzz target: persisted settings record
//!
//! Feeds arbitrary bytes to the record decoder and to a `PreferenceStore`
//! backed by the same bytes.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - `decode` only accepts exactly one record carrying the current version
//! - The store always yields an index inside the colour table
//! - An accepted in-range record re-encodes to the same bytes
//!
//! cargo fuzz run fuzz_settings_record

#![no_main]

use libfuzzer_sys::fuzz_target;
use rgb_backlight::adapters::storage::MemoryStorage;
use rgb_backlight::color::COLORS;
use rgb_backlight::settings::{self, PreferenceStore, RECORD_SIZE, SETTINGS_VERSION};

fuzz_target!(|data: &[u8]| {
    let decoded = settings::decode(data);

    if let Ok(p) = decoded {
        assert_eq!(data.len(), RECORD_SIZE);
        assert_eq!(p.schema_version, SETTINGS_VERSION);
        // Reserved bytes are not round-tripped; compare the meaningful prefix.
        assert_eq!(settings::encode(p)[..5], data[..5]);
    }

    let mut storage = MemoryStorage::new();
    storage.write_raw(data);
    let mut store = PreferenceStore::new(storage);
    let loaded = store.get();
    assert!((loaded.selected_color_index as usize) < COLORS.len());

    match decoded {
        Ok(p) if (p.selected_color_index as usize) < COLORS.len() => {
            assert_eq!(loaded, p);
        }
        _ => assert_eq!(loaded.selected_color_index, 0),
    }
});
