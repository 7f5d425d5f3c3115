//! Month and year grids with sprint ownership filled in per day.
//!
//! Rendering collaborators draw these; every cell is answered by the
//! [`SelectionResolver`] so the month grid, year grid and list agree on which
//! sprint owns which day.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use sprintcal_core::{SprintError, SprintResult};

use crate::selection::SelectionResolver;
use crate::SprintId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub owner: Option<SprintId>,
    pub color: Option<String>,
    pub selected: bool,
}

impl DayCell {
    fn resolve(date: NaiveDate, in_month: bool, resolver: &SelectionResolver<'_>) -> Self {
        let owner = resolver.resolve_owner(date);
        Self {
            date,
            in_month,
            owner: owner.map(|s| s.id.clone()),
            color: owner.map(|s| s.color.clone()),
            selected: resolver.is_in_selection(date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    /// Whole weeks covering `month`, each starting on `week_start`.
    pub fn build(
        year: i32,
        month: u32,
        week_start: Weekday,
        resolver: &SelectionResolver<'_>,
    ) -> SprintResult<Self> {
        let first = first_of_month(year, month)?;
        let last = last_of_month(first)?;

        let lead = days_since(first.weekday(), week_start);
        let mut day = first
            .checked_sub_days(Days::new(u64::from(lead)))
            .ok_or_else(|| out_of_range(year, month))?;

        let mut weeks = Vec::new();
        while day <= last {
            let mut week = Vec::with_capacity(7);
            for _ in 0..7 {
                let in_month = day.month() == month && day.year() == year;
                week.push(DayCell::resolve(day, in_month, resolver));
                day = day.succ_opt().ok_or_else(|| out_of_range(year, month))?;
            }
            weeks.push(week);
        }

        Ok(Self { year, month, weeks })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub months: Vec<MonthGrid>,
}

impl YearGrid {
    pub fn build(
        year: i32,
        week_start: Weekday,
        resolver: &SelectionResolver<'_>,
    ) -> SprintResult<Self> {
        let months = (1..=12)
            .map(|month| MonthGrid::build(year, month, week_start, resolver))
            .collect::<SprintResult<Vec<_>>>()?;
        Ok(Self { year, months })
    }
}

fn first_of_month(year: i32, month: u32) -> SprintResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| out_of_range(year, month))
}

fn last_of_month(first: NaiveDate) -> SprintResult<NaiveDate> {
    let (year, month) = (first.year(), first.month());
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| out_of_range(year, month))
}

fn days_since(day: Weekday, week_start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

fn out_of_range(year: i32, month: u32) -> SprintError {
    SprintError::Validation(format!("no such month: {}-{:02}", year, month))
}
