//! Settings storage adapters.
//!
//! Implements [`SettingsStorage`] two ways:
//!
//! - [`FileStorage`] — one file on a mounted filesystem (SPIFFS under
//!   ESP-IDF's VFS on the device, any directory on the host).
//! - [`MemoryStorage`] — in-memory simulation backend for tests and
//!   host runs, with switchable write failures.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::app::ports::{SettingsStorage, StorageError};

fn map_io_error(e: &io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound,
        io::ErrorKind::StorageFull => StorageError::Full,
        _ => StorageError::IoError,
    }
}

// ───────────────────────────────────────────────────────────────
// FileStorage
// ───────────────────────────────────────────────────────────────

/// The settings record as a single file at a fixed path.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStorage for FileStorage {
    fn read(&self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let mut file = fs::File::open(&self.path).map_err(|e| map_io_error(&e))?;
        let mut total = 0;
        while total < buf.len() {
            match file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(map_io_error(&e)),
            }
        }
        debug!("FileStorage: read {} bytes from {}", total, self.path.display());
        Ok(total)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        // Truncates any previous record.
        fs::write(&self.path, data).map_err(|e| map_io_error(&e))?;
        debug!("FileStorage: wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// MemoryStorage
// ───────────────────────────────────────────────────────────────

/// In-memory simulation backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Option<Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place raw bytes in storage, bypassing the record codec.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.record = Some(data.to_vec());
    }

    /// Raw stored bytes, if any.
    pub fn raw(&self) -> Option<&[u8]> {
        self.record.as_deref()
    }

    /// Make subsequent [`SettingsStorage::write`] calls fail with
    /// [`StorageError::IoError`].
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SettingsStorage for MemoryStorage {
    fn read(&self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let record = self.record.as_ref().ok_or(StorageError::NotFound)?;
        let n = record.len().min(buf.len());
        buf[..n].copy_from_slice(&record[..n]);
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.record = Some(data.to_vec());
        self.writes += 1;
        Ok(())
    }
}
