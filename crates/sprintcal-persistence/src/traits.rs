use async_trait::async_trait;
use sprintcal_core::SprintResult;
use std::path::PathBuf;

/// Durable key-value text store, the local-storage analogue.
///
/// Reads and writes are synchronous; callers write through after every
/// mutation and never retry.
#[cfg_attr(test, mockall::automock)]
pub trait StorageGateway {
    /// Text stored under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> SprintResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> SprintResult<()>;
}

/// Moves text between the user and the filesystem for import and export.
#[async_trait]
pub trait FileTransfer: Send + Sync {
    /// Let the user pick a file matching `accept` and read it as text.
    ///
    /// `Ok(None)` means no file was chosen.
    async fn pick_and_read_text(&self, accept: &str) -> SprintResult<Option<String>>;

    /// Offer `text` as a downloadable file. Returns where it ended up.
    fn offer_download(&self, filename: &str, text: &str) -> SprintResult<PathBuf>;
}
