use thiserror::Error;

#[derive(Error, Debug)]
pub enum SprintError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SprintError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::CorruptData(_))
    }
}
