use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use sprintcal_core::{SprintError, SprintResult};
use std::fmt;
use uuid::Uuid;

use crate::field_update::FieldUpdate;

/// Opaque sprint identifier.
///
/// New sprints get a random UUID; imported sprints keep whatever id they
/// were exported with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SprintId(String);

impl SprintId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SprintId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SprintId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Anything that denotes a calendar day, with or without a time of day.
///
/// Containment checks go through this trait so the time component never
/// takes part in a comparison.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for &NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        **self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// A named, colored, inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: SprintId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
}

impl Sprint {
    /// Whether `date` falls inside `[start_date, end_date]`, compared by day.
    pub fn contains_date(&self, date: impl CalendarDay) -> bool {
        let day = date.calendar_day();
        self.start_date <= day && day <= self.end_date
    }

    pub fn validate(&self) -> SprintResult<()> {
        validate_fields(&self.name, self.start_date, self.end_date)
    }

    /// Apply a patch to this record, leaving `id` untouched.
    pub fn apply(&mut self, patch: SprintPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        patch.description.apply_to(&mut self.description);
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Fields supplied by the caller when creating a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSprint {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewSprint {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date,
            end_date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> SprintResult<()> {
        validate_fields(&self.name, self.start_date, self.end_date)
    }
}

/// Partial changes to an existing sprint
#[derive(Debug, Clone, Default)]
pub struct SprintPatch {
    pub name: Option<String>,
    pub description: FieldUpdate<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
}

impl SprintPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && !self.description.is_change()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.color.is_none()
    }
}

/// Years the stored timestamp format can represent.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

fn validate_fields(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> SprintResult<()> {
    if name.trim().is_empty() {
        return Err(SprintError::Validation(
            "sprint name must not be empty".to_string(),
        ));
    }
    for date in [start_date, end_date] {
        if !SUPPORTED_YEARS.contains(&date.year()) {
            return Err(SprintError::Validation(format!(
                "date {} is outside years {} to {}",
                date,
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            )));
        }
    }
    if start_date > end_date {
        return Err(SprintError::Validation(format!(
            "start date {} is after end date {}",
            start_date, end_date
        )));
    }
    Ok(())
}
