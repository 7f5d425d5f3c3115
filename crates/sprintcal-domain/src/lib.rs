pub mod calendar;
pub mod field_update;
pub mod palette;
pub mod query;
pub mod selection;
pub mod sprint;
pub mod state;
pub mod store;

pub use calendar::{DayCell, MonthGrid, YearGrid};
pub use field_update::FieldUpdate;
pub use palette::{Palette, STANDARD_COLORS};
pub use selection::{SelectionResolver, SprintSelection, ViewFocus};
pub use sprint::{CalendarDay, NewSprint, Sprint, SprintId, SprintPatch};
pub use state::StoreState;
pub use store::SprintStore;
