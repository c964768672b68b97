use crate::error::StoreError;
use crate::results::JobRecord;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

/// Durable holder of the most recently completed search's records
pub trait ResultStore: Send + Sync {
    /// Replace the stored records. Concurrent loads observe either the old or the new contents.
    fn save(&self, records: &[JobRecord]) -> Result<(), StoreError>;

    /// Stored records, or an empty list when nothing usable is stored
    fn load(&self) -> Vec<JobRecord>;
}

/// Stores records as a pretty-printed JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for JsonFileStore {
    fn save(&self, records: &[JobRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;

        // Write beside the target so the final rename stays on one filesystem
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        ::log::debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Vec<JobRecord> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                ::log::warn!("Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            ::log::warn!(
                "Ignoring unreadable result store {}: {}",
                self.path.display(),
                e
            );
            Vec::new()
        })
    }
}

/// Keeps records in memory; useful for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<JobRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn save(&self, records: &[JobRecord]) -> Result<(), StoreError> {
        let mut stored = self.records.write().map_err(|_| StoreError::Poisoned)?;
        *stored = records.to_vec();
        Ok(())
    }

    fn load(&self) -> Vec<JobRecord> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}
