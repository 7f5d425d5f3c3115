use sprintcal_core::{SprintError, SprintResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::store::atomic_writer::AtomicWriter;
use crate::traits::StorageGateway;

/// Gateway backed by a single JSON object file mapping keys to text values.
///
/// A missing file reads as empty. A file that is not an object of strings is
/// reported as corrupt and never overwritten.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> SprintResult<BTreeMap<String, String>> {
        let Some(text) = AtomicWriter::read_optional(&self.path)? else {
            return Ok(BTreeMap::new());
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            SprintError::CorruptData(format!("{} is not a key-value file: {}", self.path.display(), e))
        })
    }
}

impl StorageGateway for JsonFileGateway {
    fn get(&self, key: &str) -> SprintResult<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> SprintResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());

        let bytes = serde_json::to_vec_pretty(&entries)
            .map_err(|e| SprintError::Storage(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &bytes)?;

        tracing::info!("Saved key '{}' to {}", key, self.path.display());
        Ok(())
    }
}
