//! Error types for the persistence and configuration paths.
//!
//! The transmission path has no error type at all: a timing violation is a
//! signal-integrity defect that cannot be observed from software. Everything
//! here is non-fatal; callers log it and fall back to defaults.

use core::fmt;

use crate::app::ports::StorageError;

// ---------------------------------------------------------------------------
// Settings record errors
// ---------------------------------------------------------------------------

/// Why a persisted preference could not be loaded or saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// The storage backend failed (missing file, I/O error, ...).
    Storage(StorageError),
    /// The record on storage is not exactly one record long.
    SizeMismatch { expected: usize, found: usize },
    /// The record was written by an incompatible schema.
    VersionMismatch { expected: u32, found: u32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::SizeMismatch { expected, found } => {
                write!(f, "record size mismatch ({found} != {expected} bytes)")
            }
            Self::VersionMismatch { expected, found } => {
                write!(f, "version({found} != {expected}) mismatch")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<StorageError> for SettingsError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from parsing or validating a [`BacklightConfig`](crate::config::BacklightConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(serde_json::Error),
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::ValidationFailed(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
