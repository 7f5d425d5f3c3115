use crate::{Notice, SprintResult};

/// Durable home for a piece of application state.
///
/// `load` returns `Ok(None)` when nothing has been stored yet, so a first run
/// is distinguishable from corrupt data.
pub trait StateRepository<S> {
    fn load(&mut self) -> SprintResult<Option<S>>;
    fn save(&mut self, state: &S) -> SprintResult<()>;

    /// Messages produced while loading that the user should see, such as
    /// records that were dropped.
    fn take_notices(&mut self) -> Vec<Notice> {
        Vec::new()
    }
}
