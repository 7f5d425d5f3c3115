use chrono::NaiveDate;
use sprintcal_core::{Notice, SprintResult, StateRepository};
use sprintcal_domain::StoreState;

use crate::serialization::{decode_date, encode_date, RecordPolicy, SprintCodec};
use crate::traits::StorageGateway;

/// Key holding the sprint envelope.
pub const SPRINTS_KEY: &str = "sprints";
/// Key holding the end date of the most recently created sprint.
pub const LAST_END_KEY: &str = "lastSprintEndDate";

/// Stores sprint state in a [`StorageGateway`] through the [`SprintCodec`].
///
/// Loading drops records with an inverted range, an empty name, an
/// unreadable date or a repeated id instead of failing; each dropped record
/// becomes a warning notice.
pub struct GatewayRepository<G: StorageGateway> {
    gateway: G,
    codec: SprintCodec,
    notices: Vec<Notice>,
}

impl<G: StorageGateway> GatewayRepository<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            codec: SprintCodec::default(),
            notices: Vec::new(),
        }
    }

    pub fn codec(&self) -> &SprintCodec {
        &self.codec
    }

    /// End date of the last sprint created, used to default the next start.
    pub fn last_end_date(&self) -> SprintResult<Option<NaiveDate>> {
        self.gateway
            .get(LAST_END_KEY)?
            .map(|text| decode_date(&text))
            .transpose()
    }

    pub fn record_last_end_date(&mut self, date: NaiveDate) -> SprintResult<()> {
        self.gateway.set(LAST_END_KEY, &encode_date(date))
    }
}

impl<G: StorageGateway> StateRepository<StoreState> for GatewayRepository<G> {
    fn load(&mut self) -> SprintResult<Option<StoreState>> {
        let Some(text) = self.gateway.get(SPRINTS_KEY)? else {
            return Ok(None);
        };

        let decoded = self.codec.decode_state(&text, RecordPolicy::SkipInvalid)?;
        for rejected in &decoded.rejected {
            self.notices.push(Notice::warning(format!(
                "Skipped saved sprint {} ({}): {}",
                rejected.index, rejected.id, rejected.reason
            )));
        }

        Ok(Some(decoded.value))
    }

    fn save(&mut self, state: &StoreState) -> SprintResult<()> {
        let text = self.codec.encode_state(state)?;
        self.gateway.set(SPRINTS_KEY, &text)
    }

    fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
