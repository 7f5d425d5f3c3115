//! Read-only helpers over a sprint collection.

use chrono::{Days, NaiveDate};

use crate::Sprint;

/// List-view order: latest start date first. Ties keep store order.
pub fn display_order(sprints: &[Sprint]) -> Vec<&Sprint> {
    let mut ordered: Vec<&Sprint> = sprints.iter().collect();
    ordered.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    ordered
}

/// Start date offered for a new sprint: the day after the previous sprint
/// ended, or `today` when there is no previous sprint.
pub fn default_start_date(last_end: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    last_end
        .and_then(|end| end.succ_opt())
        .unwrap_or(today)
}

/// End date for a sprint of `length_days` starting on `start`.
pub fn default_end_date(start: NaiveDate, length_days: u32) -> NaiveDate {
    let span = u64::from(length_days.max(1) - 1);
    start.checked_add_days(Days::new(span)).unwrap_or(start)
}
