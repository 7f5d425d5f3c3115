//! Which sprint owns a calendar day, and which one is selected.
//!
//! The selection is a weak reference by id. It is looked up against the
//! current sprints on every read, so a selection pointing at a deleted sprint
//! behaves exactly like no selection.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sprintcal_core::{SprintError, SprintResult, ToggleSelection};

use crate::sprint::CalendarDay;
use crate::{Sprint, SprintId};

/// Answers ownership questions for one rendering pass.
#[derive(Debug, Clone, Copy)]
pub struct SelectionResolver<'a> {
    sprints: &'a [Sprint],
    selected: Option<&'a Sprint>,
}

impl<'a> SelectionResolver<'a> {
    /// `selected_id` is checked against `sprints`; an unknown id is ignored.
    pub fn new(sprints: &'a [Sprint], selected_id: Option<&SprintId>) -> Self {
        let selected = selected_id.and_then(|id| sprints.iter().find(|s| &s.id == id));
        Self { sprints, selected }
    }

    pub fn selected(&self) -> Option<&'a Sprint> {
        self.selected
    }

    /// The sprint whose color a day cell shows.
    ///
    /// The selected sprint wins over every overlapping sprint for the days it
    /// covers. Otherwise the first sprint in store order containing the day.
    pub fn resolve_owner(&self, date: impl CalendarDay) -> Option<&'a Sprint> {
        let day = date.calendar_day();
        if let Some(selected) = self.selected.filter(|s| s.contains_date(day)) {
            return Some(selected);
        }
        self.sprints.iter().find(|s| s.contains_date(day))
    }

    /// Whether the day lies inside the selected sprint.
    pub fn is_in_selection(&self, date: impl CalendarDay) -> bool {
        let day = date.calendar_day();
        self.selected.is_some_and(|s| s.contains_date(day))
    }
}

/// Output event asking the calendar views to bring a range into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewFocus {
    pub sprint_id: SprintId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ViewFocus {
    pub fn for_sprint(sprint: &Sprint) -> Self {
        Self {
            sprint_id: sprint.id.clone(),
            start: sprint.start_date,
            end: sprint.end_date,
        }
    }

    /// Year and month a month view should switch to.
    pub fn anchor_month(&self) -> (i32, u32) {
        (self.start.year(), self.start.month())
    }
}

/// The selected-sprint pointer shared by the month grid, year grid, and list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SprintSelection {
    inner: ToggleSelection<SprintId>,
}

impl SprintSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_id(id: Option<SprintId>) -> Self {
        Self {
            inner: ToggleSelection::with_selected(id),
        }
    }

    /// Raw selected id. May point at a sprint that no longer exists.
    pub fn id(&self) -> Option<&SprintId> {
        self.inner.get()
    }

    /// The selected sprint, if the id still resolves.
    pub fn selected<'a>(&self, sprints: &'a [Sprint]) -> Option<&'a Sprint> {
        self.resolver(sprints).selected()
    }

    pub fn resolver<'a>(&self, sprints: &'a [Sprint]) -> SelectionResolver<'a> {
        SelectionResolver::new(sprints, self.inner.get())
    }

    /// Select `id`, or deselect it when it is already selected.
    ///
    /// Returns a focus event when the sprint ends up selected.
    pub fn toggle_sprint(
        &mut self,
        id: &SprintId,
        sprints: &[Sprint],
    ) -> SprintResult<Option<ViewFocus>> {
        let sprint = sprints
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| SprintError::NotFound(format!("sprint {}", id)))?;

        if self.inner.toggle(sprint.id.clone()) {
            Ok(Some(ViewFocus::for_sprint(sprint)))
        } else {
            Ok(None)
        }
    }

    /// Select the sprint owning `date`, with the same toggle behavior as
    /// [`toggle_sprint`](Self::toggle_sprint). A day no sprint covers clears
    /// the selection.
    pub fn select_date(&mut self, date: impl CalendarDay, sprints: &[Sprint]) -> Option<ViewFocus> {
        let owner = self.resolver(sprints).resolve_owner(date);
        match owner {
            Some(sprint) => {
                if self.inner.toggle(sprint.id.clone()) {
                    Some(ViewFocus::for_sprint(sprint))
                } else {
                    None
                }
            }
            None => {
                self.inner.clear();
                None
            }
        }
    }

    /// Drop the selection if it points at the deleted sprint.
    pub fn on_deleted(&mut self, id: &SprintId) -> bool {
        self.inner.clear_if(id)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
