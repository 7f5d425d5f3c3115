pub mod config;
pub mod error;
pub mod notice;
pub mod result;
pub mod selection;
pub mod traits;

pub use config::{AppConfig, WeekStart};
pub use error::SprintError;
pub use notice::{Notice, NoticeLevel, Noticeable};
pub use result::SprintResult;
pub use selection::ToggleSelection;
pub use traits::StateRepository;
