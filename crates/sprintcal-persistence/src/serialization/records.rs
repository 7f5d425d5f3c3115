//! Wire shapes. Field names follow the stored JSON, not Rust conventions.

use serde::{Deserialize, Serialize};
use sprintcal_core::SprintResult;
use sprintcal_domain::{Sprint, SprintId};

use super::timestamp::{decode_date, encode_date};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub color: String,
}

/// Persisted form in the keyed store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub sprints: Vec<SprintRecord>,
    pub color_index: u64,
}

impl From<&Sprint> for SprintRecord {
    fn from(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id.as_str().to_string(),
            name: sprint.name.clone(),
            description: sprint.description.clone(),
            start_date: encode_date(sprint.start_date),
            end_date: encode_date(sprint.end_date),
            color: sprint.color.clone(),
        }
    }
}

impl SprintRecord {
    /// Convert to the domain type. Only date parsing can fail here; range and
    /// name checks are left to the caller's record policy.
    pub fn into_sprint(self) -> SprintResult<Sprint> {
        Ok(Sprint {
            id: SprintId::new(self.id),
            name: self.name,
            description: self.description,
            start_date: decode_date(&self.start_date)?,
            end_date: decode_date(&self.end_date)?,
            color: self.color,
        })
    }
}
