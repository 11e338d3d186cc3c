//! Schedule state persistence with file locking.
//!
//! The persisted record is a single JSON document. Corrupt or missing data
//! is never fatal: the store falls back to the onboarding defaults so the
//! system degrades to an earlier lifecycle stage instead of erroring.

use crate::{Error, Result, ScheduleState};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl ScheduleState {
    /// Load schedule state from a file with shared locking
    ///
    /// Returns default (onboarding) state if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No schedule file found, using onboarding defaults");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open schedule file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock schedule file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read schedule file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<ScheduleState>(&contents) {
            Ok(mut state) => {
                state.normalize();
                tracing::debug!("Loaded schedule state from {:?}", path);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse schedule file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save schedule state to a file with exclusive locking
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "schedule path missing parent")
        })?)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old schedule file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved schedule state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back atomically
    ///
    /// Every CLI mutation goes through this, which also guarantees the
    /// "persist only after the real load" lifecycle: defaults are never
    /// written over stored data before the load has happened.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut ScheduleState) -> Result<()>,
    {
        let mut state = Self::load(path)?;
        f(&mut state)?;
        state.save(path)?;
        Ok(state)
    }

    /// Repair invariants on data read from disk.
    ///
    /// A hand-edited or stale file can carry a rotation index outside
    /// {0, 1, 2}; treat that as recoverable corruption.
    fn normalize(&mut self) {
        if self.rotation_index > 2 {
            tracing::warn!(
                "Stored rotation index {} out of range, resetting to 0",
                self.rotation_index
            );
            self.rotation_index = 0;
        }
    }
}
