use chrono::NaiveDate;
use serde::Serialize;
use sprintcal_core::{AppConfig, Notice, Noticeable, SprintResult};
use sprintcal_domain::query::{default_end_date, default_start_date, display_order};
use sprintcal_domain::{
    MonthGrid, NewSprint, Sprint, SprintId, SprintPatch, SprintSelection, SprintStore, ViewFocus,
    YearGrid,
};
use sprintcal_persistence::{
    export_sprints, import_sprints, FileTransfer, GatewayRepository, JsonFileGateway, SprintCodec,
};
use std::path::{Path, PathBuf};

pub type FileStore = SprintStore<GatewayRepository<JsonFileGateway>>;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    pub deleted: Option<Sprint>,
    pub selection_cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerReport {
    pub date: NaiveDate,
    pub owner: Option<Sprint>,
    pub in_selection: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub selected: Option<Sprint>,
    pub focus: Option<ViewFocus>,
    /// Month a calendar view should switch to for the focused range.
    pub anchor: Option<MonthAnchor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthAnchor {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub color_index: usize,
    pub selection_cleared: bool,
}

pub struct CliContext {
    store: FileStore,
    selection: SprintSelection,
    config: AppConfig,
    notices: Vec<Notice>,
}

impl CliContext {
    /// Open the sprint file at `path`. A missing file is an empty store;
    /// unreadable contents become notices rather than errors.
    pub fn load(path: &Path, config: AppConfig) -> Self {
        let store = SprintStore::open(GatewayRepository::new(JsonFileGateway::new(path)));
        tracing::debug!("Opened {} with {} sprints", path.display(), store.len());
        Self {
            store,
            selection: SprintSelection::new(),
            config,
            notices: Vec::new(),
        }
    }

    /// Restore the selection carried over from a previous invocation.
    pub fn restore_selection(&mut self, selected: Option<String>) {
        self.selection = SprintSelection::from_id(selected.map(SprintId::from));
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn selected(&self) -> Option<&Sprint> {
        self.selection.selected(self.store.sprints())
    }

    pub fn create_sprint(
        &mut self,
        name: String,
        description: Option<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> SprintResult<Sprint> {
        let start = match start {
            Some(start) => start,
            None => default_start_date(self.last_end_date(), today),
        };
        let end = end.unwrap_or_else(|| default_end_date(start, self.config.effective_sprint_days()));

        let mut new_sprint = NewSprint::new(name, start, end);
        if let Some(description) = description {
            new_sprint = new_sprint.with_description(description);
        }

        let sprint = self.store.create(new_sprint)?;
        if let Err(e) = self
            .store
            .repository_mut()
            .record_last_end_date(sprint.end_date)
        {
            tracing::warn!("Failed to record last sprint end date: {}", e);
            self.notices
                .push(Notice::warning(format!("Could not remember sprint end date: {}", e)));
        }
        Ok(sprint)
    }

    fn last_end_date(&mut self) -> Option<NaiveDate> {
        match self.store.repository().last_end_date() {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Ignoring unreadable last sprint end date: {}", e);
                self.notices.push(Notice::warning(format!(
                    "Ignored stored sprint end date: {}",
                    e
                )));
                None
            }
        }
    }

    pub fn list_sprints(&self) -> Vec<Sprint> {
        display_order(self.store.sprints())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_sprint(&self, id: &SprintId) -> Option<&Sprint> {
        self.store.get(id)
    }

    pub fn update_sprint(&mut self, id: &SprintId, patch: SprintPatch) -> SprintResult<Sprint> {
        self.store.patch(id, patch)
    }

    pub fn delete_sprint(&mut self, id: &SprintId) -> DeleteOutcome {
        let deleted = self.store.delete(id);
        let selection_cleared = self.selection.on_deleted(id);
        DeleteOutcome {
            deleted,
            selection_cleared,
        }
    }

    pub fn clear_sprints(&mut self) -> bool {
        let had_selection = self.selection.id().is_some();
        self.store.clear_all();
        self.selection.clear();
        had_selection
    }

    pub fn owner(&self, date: NaiveDate) -> OwnerReport {
        let resolver = self.selection.resolver(self.store.sprints());
        OwnerReport {
            date,
            owner: resolver.resolve_owner(date).cloned(),
            in_selection: resolver.is_in_selection(date),
        }
    }

    pub fn select_sprint(&mut self, id: &SprintId) -> SprintResult<SelectionReport> {
        let focus = self.selection.toggle_sprint(id, self.store.sprints())?;
        Ok(self.selection_report(focus))
    }

    pub fn select_date(&mut self, date: NaiveDate) -> SelectionReport {
        let focus = self.selection.select_date(date, self.store.sprints());
        self.selection_report(focus)
    }

    fn selection_report(&self, focus: Option<ViewFocus>) -> SelectionReport {
        let anchor = focus.as_ref().map(|f| {
            let (year, month) = f.anchor_month();
            MonthAnchor { year, month }
        });
        SelectionReport {
            selected: self.selected().cloned(),
            focus,
            anchor,
        }
    }

    pub fn month_grid(&self, year: i32, month: u32) -> SprintResult<MonthGrid> {
        let resolver = self.selection.resolver(self.store.sprints());
        MonthGrid::build(
            year,
            month,
            self.config.effective_week_start().weekday(),
            &resolver,
        )
    }

    pub fn year_grid(&self, year: i32) -> SprintResult<YearGrid> {
        let resolver = self.selection.resolver(self.store.sprints());
        YearGrid::build(year, self.config.effective_week_start().weekday(), &resolver)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.config.effective_download_dir()
    }

    /// Bare-array export text, as written to an export file.
    pub fn export_text(&self) -> SprintResult<String> {
        self.codec().encode_export(self.store.sprints())
    }

    pub fn export_to<T: FileTransfer + ?Sized>(
        &self,
        transfer: &T,
        today: NaiveDate,
    ) -> SprintResult<PathBuf> {
        export_sprints(transfer, &self.codec(), self.store.sprints(), today)
    }

    /// Replace every sprint with the picked file's contents.
    ///
    /// Nothing changes when no file is chosen or the file is rejected.
    pub async fn import<T: FileTransfer + ?Sized>(
        &mut self,
        transfer: &T,
    ) -> SprintResult<Option<ImportOutcome>> {
        let codec = self.codec();
        let Some(sprints) = import_sprints(transfer, &codec).await? else {
            return Ok(None);
        };

        let imported = sprints.len();
        let selection_cleared = self.selection.id().is_some();
        self.store.replace_all(sprints);
        self.selection.clear();

        Ok(Some(ImportOutcome {
            imported,
            color_index: self.store.color_index(),
            selection_cleared,
        }))
    }

    fn codec(&self) -> SprintCodec {
        *self.store.repository().codec()
    }

    /// Notices queued by the store and by this context since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices = self.store.take_notices();
        notices.append(&mut self.notices);
        notices
    }
}
