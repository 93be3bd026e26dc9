//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                       |
//! |------------|-------------------|-----------------------------------|
//! | `hardware` | DataLine          | ESP32 GPIO / embedded-hal pin     |
//! |            | CycleCounter      | Xtensa CCOUNT / host clock        |
//! |            | AtomicSection     | critical-section (IRQs masked)    |
//! | `storage`  | SettingsStorage   | SPIFFS file / in-memory store     |
//! | `time`     | —                 | ESP32 system timer (button polls) |

pub mod hardware;
pub mod storage;
pub mod time;
