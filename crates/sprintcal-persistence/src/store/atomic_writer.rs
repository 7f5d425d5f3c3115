use sprintcal_core::{SprintError, SprintResult};
use std::io::Write;
use std::path::Path;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating missing parent directories.
    /// A crash mid-write leaves the previous contents in place.
    pub fn write_atomic(path: &Path, data: &[u8]) -> SprintResult<()> {
        // Temp file must live on the same filesystem for the rename to be atomic
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(data)?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(path)
            .map_err(|e| SprintError::Io(e.error))?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a whole file as text, or `None` if it does not exist.
    pub fn read_optional(path: &Path) -> SprintResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
