use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A non-blocking message meant for the user, such as a failed save or a
/// record dropped while loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

pub trait Noticeable {
    fn push_notice(&mut self, notice: Notice);
    fn notices(&self) -> &[Notice];
    /// Drain pending notices, leaving none behind.
    fn take_notices(&mut self) -> Vec<Notice>;
}
