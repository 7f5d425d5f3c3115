//! Import and export of sprint files.

use async_trait::async_trait;
use chrono::NaiveDate;
use sprintcal_core::{SprintError, SprintResult};
use sprintcal_domain::Sprint;
use std::path::{Path, PathBuf};

use crate::serialization::{RecordPolicy, SprintCodec};
use crate::store::AtomicWriter;
use crate::traits::FileTransfer;

/// Files offered by the import picker.
pub const IMPORT_ACCEPT: &str = ".json,application/json";

/// Export filename for `today`, e.g. `sprints-2024-01-15.json`.
pub fn export_filename(today: NaiveDate) -> String {
    format!("sprints-{}.json", today.format("%Y-%m-%d"))
}

/// Ask the user for a sprint file and decode it.
///
/// Returns `Ok(None)` when no file was chosen. Any invalid record aborts the
/// whole import so the caller's state stays untouched.
pub async fn import_sprints<T: FileTransfer + ?Sized>(
    transfer: &T,
    codec: &SprintCodec,
) -> SprintResult<Option<Vec<Sprint>>> {
    let Some(text) = transfer.pick_and_read_text(IMPORT_ACCEPT).await? else {
        tracing::info!("Import cancelled, no file chosen");
        return Ok(None);
    };

    let decoded = codec.decode_import(&text, RecordPolicy::Strict)?;
    tracing::info!("Decoded {} sprints for import", decoded.value.len());
    Ok(Some(decoded.value))
}

/// Encode `sprints` as an export file and offer it for download.
pub fn export_sprints<T: FileTransfer + ?Sized>(
    transfer: &T,
    codec: &SprintCodec,
    sprints: &[Sprint],
    today: NaiveDate,
) -> SprintResult<PathBuf> {
    let text = codec.encode_export(sprints)?;
    let path = transfer.offer_download(&export_filename(today), &text)?;
    tracing::info!("Exported {} sprints to {}", sprints.len(), path.display());
    Ok(path)
}

/// File transfer over the local filesystem.
///
/// The "picked" file is decided up front (a CLI argument); downloads land in
/// `download_dir`.
#[derive(Debug, Clone)]
pub struct LocalFileTransfer {
    source: Option<PathBuf>,
    download_dir: PathBuf,
}

impl LocalFileTransfer {
    pub fn new(download_dir: impl AsRef<Path>) -> Self {
        Self {
            source: None,
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }

    pub fn with_source(mut self, source: impl AsRef<Path>) -> Self {
        self.source = Some(source.as_ref().to_path_buf());
        self
    }
}

#[async_trait]
impl FileTransfer for LocalFileTransfer {
    async fn pick_and_read_text(&self, accept: &str) -> SprintResult<Option<String>> {
        let Some(path) = &self.source else {
            return Ok(None);
        };

        if !accepts(accept, path) {
            return Err(SprintError::Validation(format!(
                "{} does not match accepted types '{}'",
                path.display(),
                accept
            )));
        }

        let text = tokio::fs::read_to_string(path).await?;
        tracing::debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(Some(text))
    }

    fn offer_download(&self, filename: &str, text: &str) -> SprintResult<PathBuf> {
        let path = self.download_dir.join(filename);
        AtomicWriter::write_atomic(&path, text.as_bytes())?;
        Ok(path)
    }
}

/// Whether `path` matches an accept pattern like `.json,application/json`.
/// Only extension entries constrain the match; with none, everything passes.
fn accepts(pattern: &str, path: &Path) -> bool {
    let extensions: Vec<&str> = pattern
        .split(',')
        .map(str::trim)
        .filter_map(|entry| entry.strip_prefix('.'))
        .collect();

    if extensions.is_empty() {
        return true;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}
