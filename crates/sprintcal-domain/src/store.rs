//! The authoritative in-memory sprint collection.
//!
//! Every successful mutation is written through to the injected
//! [`StateRepository`]. A failed write does not undo the mutation: in-memory
//! state stays the source of truth for the session and the failure is queued
//! as a [`Notice`].

use sprintcal_core::{Notice, Noticeable, SprintError, SprintResult, StateRepository};

use crate::palette::Palette;
use crate::state::StoreState;
use crate::{NewSprint, Sprint, SprintId, SprintPatch};

pub struct SprintStore<R: StateRepository<StoreState>> {
    sprints: Vec<Sprint>,
    color_index: usize,
    palette: Palette,
    repository: R,
    notices: Vec<Notice>,
}

impl<R: StateRepository<StoreState>> SprintStore<R> {
    /// Open a store backed by `repository`, loading whatever it holds.
    ///
    /// Corrupt persisted data never fails the open: the store starts empty and
    /// the problem is reported as a notice.
    pub fn open(repository: R) -> Self {
        let mut store = Self {
            sprints: Vec::new(),
            color_index: 0,
            palette: Palette::STANDARD,
            repository,
            notices: Vec::new(),
        };
        store.reload();
        store
    }

    /// Re-read persisted state. On failure the current in-memory state is kept.
    pub fn reload(&mut self) {
        let loaded = self.repository.load();
        let load_notices = self.repository.take_notices();
        self.notices.extend(load_notices);

        match loaded {
            Ok(Some(state)) => {
                tracing::info!(
                    "Loaded {} sprints (color index {})",
                    state.sprints.len(),
                    state.color_index
                );
                self.sprints = state.sprints;
                self.color_index = self.palette.normalize_cursor(state.color_index);
            }
            Ok(None) => {
                tracing::debug!("No persisted sprints found");
            }
            Err(e) => {
                tracing::warn!("Failed to load persisted sprints: {}", e);
                self.notices.push(Notice::error(format!(
                    "Could not load saved sprints: {}",
                    e
                )));
            }
        }
    }

    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn len(&self) -> usize {
        self.sprints.len()
    }

    pub fn get(&self, id: &SprintId) -> Option<&Sprint> {
        self.sprints.iter().find(|s| &s.id == id)
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn state(&self) -> StoreState {
        StoreState::new(self.sprints.clone(), self.color_index)
    }

    pub fn create(&mut self, new_sprint: NewSprint) -> SprintResult<Sprint> {
        new_sprint.validate()?;

        let (color, next_index) = self.palette.next_color(self.color_index);
        let sprint = Sprint {
            id: SprintId::generate(),
            name: new_sprint.name.trim().to_string(),
            description: new_sprint.description,
            start_date: new_sprint.start_date,
            end_date: new_sprint.end_date,
            color: color.to_string(),
        };

        self.sprints.push(sprint.clone());
        self.color_index = next_index;
        tracing::debug!("Created sprint {} with color {}", sprint.id, sprint.color);

        self.persist();
        Ok(sprint)
    }

    /// Replace the stored record whose id matches `sprint.id`.
    pub fn update(&mut self, mut sprint: Sprint) -> SprintResult<Sprint> {
        sprint.validate()?;
        sprint.name = sprint.name.trim().to_string();

        let slot = self
            .sprints
            .iter_mut()
            .find(|s| s.id == sprint.id)
            .ok_or_else(|| SprintError::NotFound(format!("sprint {}", sprint.id)))?;
        *slot = sprint.clone();
        tracing::debug!("Updated sprint {}", sprint.id);

        self.persist();
        Ok(sprint)
    }

    /// Apply a partial change on top of the stored record, then `update`.
    pub fn patch(&mut self, id: &SprintId, patch: SprintPatch) -> SprintResult<Sprint> {
        let mut sprint = self
            .get(id)
            .cloned()
            .ok_or_else(|| SprintError::NotFound(format!("sprint {}", id)))?;
        sprint.apply(patch);
        self.update(sprint)
    }

    /// Remove the sprint with `id`. Absent ids are a no-op and nothing is written.
    ///
    /// Returns the removed record so the caller can drop a selection pointing at it.
    pub fn delete(&mut self, id: &SprintId) -> Option<Sprint> {
        let position = self.sprints.iter().position(|s| &s.id == id)?;
        let removed = self.sprints.remove(position);
        tracing::debug!("Deleted sprint {}", id);

        self.persist();
        Some(removed)
    }

    /// Swap in a whole new collection, as done by import.
    pub fn replace_all(&mut self, sprints: Vec<Sprint>) {
        self.color_index = if sprints.is_empty() {
            0
        } else {
            self.palette.cursor_after_import(&sprints)
        };
        self.sprints = sprints;
        tracing::info!(
            "Replaced sprint collection ({} sprints, color index {})",
            self.sprints.len(),
            self.color_index
        );

        self.persist();
    }

    /// Remove every sprint and restart color rotation.
    pub fn clear_all(&mut self) {
        self.replace_all(Vec::new());
    }

    fn persist(&mut self) {
        let state = self.state();
        if let Err(e) = self.repository.save(&state) {
            tracing::warn!("Failed to persist sprints: {}", e);
            self.notices.push(Notice::warning(format!(
                "Changes are kept for this session but could not be saved: {}",
                e
            )));
        }
    }
}

impl<R: StateRepository<StoreState>> Noticeable for SprintStore<R> {
    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::STANDARD_COLORS;
    use crate::selection::SelectionResolver;
    use chrono::NaiveDate;
    use sprintcal_core::NoticeLevel;

    /// Repository double that records every save and can be told to fail.
    #[derive(Default)]
    struct RecordingRepository {
        stored: Option<StoreState>,
        saves: usize,
        fail_saves: bool,
        fail_load: bool,
    }

    impl StateRepository<StoreState> for RecordingRepository {
        fn load(&mut self) -> SprintResult<Option<StoreState>> {
            if self.fail_load {
                return Err(SprintError::CorruptData("not json".to_string()));
            }
            Ok(self.stored.clone())
        }

        fn save(&mut self, state: &StoreState) -> SprintResult<()> {
            if self.fail_saves {
                return Err(SprintError::Storage("quota exceeded".to_string()));
            }
            self.saves += 1;
            self.stored = Some(state.clone());
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn empty_store() -> SprintStore<RecordingRepository> {
        SprintStore::open(RecordingRepository::default())
    }

    fn draft(name: &str) -> NewSprint {
        NewSprint::new(name, date(2024, 1, 1), date(2024, 1, 14))
    }

    #[test]
    fn test_create_assigns_rotating_colors() {
        let mut store = empty_store();

        let first = store
            .create(NewSprint::new("Sprint 1", date(2024, 1, 1), date(2024, 1, 14)))
            .unwrap();
        assert_eq!(first.color, STANDARD_COLORS[0]);
        assert_eq!(store.color_index(), 1);

        let second = store
            .create(NewSprint::new("Sprint 2", date(2024, 1, 15), date(2024, 1, 28)))
            .unwrap();
        assert_eq!(second.color, STANDARD_COLORS[1]);
        assert_eq!(store.color_index(), 2);

        let owner = SelectionResolver::new(store.sprints(), None)
            .resolve_owner(date(2024, 1, 20))
            .unwrap();
        assert_eq!(owner.id, second.id);
    }

    #[test]
    fn test_color_repeats_after_full_rotation() {
        let mut store = empty_store();
        let palette_size = STANDARD_COLORS.len();

        let created: Vec<Sprint> = (0..=palette_size)
            .map(|i| store.create(draft(&format!("Sprint {}", i))).unwrap())
            .collect();

        assert_eq!(created[palette_size].color, created[0].color);
        assert_eq!(store.color_index(), 1);
    }

    #[test]
    fn test_create_writes_through() {
        let mut store = empty_store();
        store.create(draft("Sprint 1")).unwrap();

        let repo = store.repository();
        assert_eq!(repo.saves, 1);
        let stored = repo.stored.as_ref().unwrap();
        assert_eq!(stored.sprints.len(), 1);
        assert_eq!(stored.color_index, 1);
    }

    #[test]
    fn test_create_validation_failure_leaves_store_untouched() {
        let mut store = empty_store();

        let err = store.create(draft("")).unwrap_err();
        assert!(err.is_validation());

        let inverted = NewSprint::new("Backwards", date(2024, 2, 1), date(2024, 1, 1));
        assert!(store.create(inverted).unwrap_err().is_validation());

        assert!(store.sprints().is_empty());
        assert_eq!(store.color_index(), 0);
        assert_eq!(store.repository().saves, 0);
    }

    #[test]
    fn test_update_replaces_record() {
        let mut store = empty_store();
        let mut sprint = store.create(draft("Sprint 1")).unwrap();

        sprint.name = "Renamed".to_string();
        sprint.color = "#000000".to_string();
        let updated = store.update(sprint.clone()).unwrap();

        assert_eq!(updated, sprint);
        assert_eq!(store.get(&sprint.id).unwrap().color, "#000000");
        assert_eq!(store.repository().saves, 2);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = empty_store();
        let mut ghost = store.create(draft("Sprint 1")).unwrap();
        ghost.id = SprintId::new("missing");

        assert!(store.update(ghost).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_rejects_inverted_range_without_writing() {
        let mut store = empty_store();
        let mut sprint = store.create(draft("Sprint 1")).unwrap();
        let original = sprint.clone();

        sprint.end_date = date(2023, 12, 1);
        assert!(store.update(sprint).unwrap_err().is_validation());
        assert_eq!(store.get(&original.id), Some(&original));
        assert_eq!(store.repository().saves, 1);
    }

    #[test]
    fn test_patch_keeps_color_unless_given() {
        let mut store = empty_store();
        let sprint = store.create(draft("Sprint 1")).unwrap();

        let patched = store
            .patch(
                &sprint.id,
                SprintPatch {
                    name: Some("Sprint One".to_string()),
                    ..SprintPatch::default()
                },
            )
            .unwrap();

        assert_eq!(patched.name, "Sprint One");
        assert_eq!(patched.color, sprint.color);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut store = empty_store();
        store.create(draft("Sprint 1")).unwrap();

        assert!(store.delete(&SprintId::new("missing")).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.repository().saves, 1);
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let mut store = empty_store();
        let sprint = store.create(draft("Sprint 1")).unwrap();

        let removed = store.delete(&sprint.id).unwrap();
        assert_eq!(removed.id, sprint.id);
        assert!(store.sprints().is_empty());
        assert_eq!(store.repository().saves, 2);
    }

    #[test]
    fn test_replace_all_recomputes_cursor() {
        let mut store = empty_store();
        let template = store.create(draft("Template")).unwrap();

        let imported: Vec<Sprint> = [2, 7, 1]
            .iter()
            .map(|&i| Sprint {
                id: SprintId::generate(),
                color: STANDARD_COLORS[i].to_string(),
                ..template.clone()
            })
            .collect();
        store.replace_all(imported);

        assert_eq!(store.color_index(), 8);
        let next = store.create(draft("After import")).unwrap();
        assert_eq!(next.color, STANDARD_COLORS[8]);
    }

    #[test]
    fn test_clear_all_resets_cursor() {
        let mut store = empty_store();
        for i in 0..5 {
            store.create(draft(&format!("Sprint {}", i))).unwrap();
        }
        assert_eq!(store.color_index(), 5);

        store.clear_all();

        assert!(store.sprints().is_empty());
        assert_eq!(store.color_index(), 0);
        let stored = store.repository().stored.as_ref().unwrap();
        assert!(stored.sprints.is_empty());
        assert_eq!(stored.color_index, 0);
    }

    #[test]
    fn test_open_restores_persisted_state() {
        let mut store = empty_store();
        store.create(draft("Sprint 1")).unwrap();
        store.create(draft("Sprint 2")).unwrap();
        let repo = RecordingRepository {
            stored: store.repository().stored.clone(),
            ..RecordingRepository::default()
        };

        let reopened = SprintStore::open(repo);
        assert_eq!(reopened.sprints(), store.sprints());
        assert_eq!(reopened.color_index(), 2);
    }

    #[test]
    fn test_open_normalizes_out_of_range_cursor() {
        let repo = RecordingRepository {
            stored: Some(StoreState::new(Vec::new(), 45)),
            ..RecordingRepository::default()
        };
        let store = SprintStore::open(repo);
        assert_eq!(store.color_index(), 5);
    }

    #[test]
    fn test_corrupt_load_starts_empty_with_notice() {
        let repo = RecordingRepository {
            fail_load: true,
            ..RecordingRepository::default()
        };
        let mut store = SprintStore::open(repo);

        assert!(store.sprints().is_empty());
        let notices = store.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(store.notices().is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_in_memory_state() {
        let mut store = empty_store();
        store.create(draft("Sprint 1")).unwrap();
        store.repository.fail_load = true;

        store.reload();

        assert_eq!(store.len(), 1);
        assert_eq!(store.notices().len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_mutation_and_reports() {
        let repo = RecordingRepository {
            fail_saves: true,
            ..RecordingRepository::default()
        };
        let mut store = SprintStore::open(repo);

        let sprint = store.create(draft("Sprint 1")).unwrap();

        assert_eq!(store.get(&sprint.id), Some(&sprint));
        assert_eq!(store.color_index(), 1);
        let notices = store.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_create_trims_name() {
        let mut store = empty_store();
        let sprint = store.create(draft("  Sprint 1  ")).unwrap();
        assert_eq!(sprint.name, "Sprint 1");
    }

    #[test]
    fn test_update_rejects_year_past_9999_without_writing() {
        let mut store = empty_store();
        let mut sprint = store.create(draft("Sprint 1")).unwrap();
        let saves = store.repository().saves;

        sprint.end_date = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        let err = store.update(sprint.clone()).unwrap_err();

        assert!(err.is_validation());
        assert_ne!(store.get(&sprint.id).unwrap().end_date, sprint.end_date);
        assert_eq!(store.repository().saves, saves);
    }

    #[test]
    fn test_update_trims_name() {
        let mut store = empty_store();
        let mut sprint = store.create(draft("Sprint 1")).unwrap();

        sprint.name = "\tRenamed  ".to_string();
        let updated = store.update(sprint.clone()).unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(store.get(&sprint.id).unwrap().name, "Renamed");
        let stored = store.repository().stored.as_ref().unwrap();
        assert_eq!(stored.sprints[0].name, "Renamed");
    }
}
