use crate::error::SprintError;

pub type SprintResult<T> = Result<T, SprintError>;
