use serde_json::Value;
use sprintcal_core::{SprintError, SprintResult};
use sprintcal_domain::{Palette, Sprint, SprintId, StoreState};
use std::collections::HashSet;

use super::records::{Envelope, SprintRecord};

/// What to do with a decoded sprint that fails validation
/// (empty name, start after end, unreadable date, repeated id).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Abort the whole decode on the first invalid record.
    Strict,
    /// Drop invalid records and report them.
    SkipInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub value: T,
    pub rejected: Vec<RejectedRecord>,
}

/// Encodes and decodes the sprint collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SprintCodec {
    palette: Palette,
}

impl SprintCodec {
    /// Keyed-store envelope with sprints and color cursor.
    pub fn encode_state(&self, state: &StoreState) -> SprintResult<String> {
        let envelope = Envelope {
            sprints: state.sprints.iter().map(SprintRecord::from).collect(),
            color_index: state.color_index as u64,
        };
        serde_json::to_string(&envelope).map_err(|e| SprintError::CorruptData(e.to_string()))
    }

    pub fn decode_state(
        &self,
        text: &str,
        policy: RecordPolicy,
    ) -> SprintResult<Decoded<StoreState>> {
        let envelope: Envelope = serde_json::from_str(text)
            .map_err(|e| SprintError::CorruptData(format!("invalid sprint store: {}", e)))?;

        let color_index = self.palette.normalize_cursor(envelope.color_index as usize);
        let Decoded { value, rejected } = validate_records(envelope.sprints, policy)?;

        Ok(Decoded {
            value: StoreState::new(value, color_index),
            rejected,
        })
    }

    /// Export file contents: the bare sprint array.
    pub fn encode_export(&self, sprints: &[Sprint]) -> SprintResult<String> {
        let records: Vec<SprintRecord> = sprints.iter().map(SprintRecord::from).collect();
        serde_json::to_string_pretty(&records).map_err(|e| SprintError::CorruptData(e.to_string()))
    }

    /// Parse an export file. Only the bare array is accepted.
    pub fn decode_import(&self, text: &str, policy: RecordPolicy) -> SprintResult<Decoded<Vec<Sprint>>> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SprintError::CorruptData(format!("import is not valid JSON: {}", e)))?;

        if !value.is_array() {
            let found = if value.get("sprints").is_some() {
                "a stored sprint envelope"
            } else {
                "a non-array value"
            };
            return Err(SprintError::CorruptData(format!(
                "expected a JSON array of sprints, found {}",
                found
            )));
        }

        let records: Vec<SprintRecord> = serde_json::from_value(value)
            .map_err(|e| SprintError::CorruptData(format!("invalid sprint in import: {}", e)))?;

        validate_records(records, policy)
    }
}

fn validate_records(
    records: Vec<SprintRecord>,
    policy: RecordPolicy,
) -> SprintResult<Decoded<Vec<Sprint>>> {
    let mut sprints = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    let mut seen: HashSet<SprintId> = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let id = record.id.clone();
        let checked = record.into_sprint().and_then(|sprint| {
            sprint.validate()?;
            if seen.contains(&sprint.id) {
                return Err(SprintError::Validation(format!(
                    "duplicate sprint id {}",
                    sprint.id
                )));
            }
            Ok(sprint)
        });

        match checked {
            Ok(sprint) => {
                seen.insert(sprint.id.clone());
                sprints.push(sprint);
            }
            Err(SprintError::Validation(reason) | SprintError::CorruptData(reason))
                if policy == RecordPolicy::SkipInvalid =>
            {
                tracing::warn!("Dropping invalid sprint {} at {}: {}", id, index, reason);
                rejected.push(RejectedRecord { index, id, reason });
            }
            Err(SprintError::Validation(reason)) => {
                return Err(SprintError::Validation(format!(
                    "sprint {} ({}): {}",
                    index, id, reason
                )));
            }
            Err(SprintError::CorruptData(reason)) => {
                return Err(SprintError::CorruptData(format!(
                    "sprint {} ({}): {}",
                    index, id, reason
                )));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Decoded {
        value: sprints,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sprintcal_domain::{SprintId, STANDARD_COLORS};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sprint(id: &str, start: NaiveDate, end: NaiveDate, description: Option<&str>) -> Sprint {
        Sprint {
            id: SprintId::new(id),
            name: format!("Sprint {}", id),
            description: description.map(str::to_string),
            start_date: start,
            end_date: end,
            color: STANDARD_COLORS[3].to_string(),
        }
    }

    #[test]
    fn test_state_roundtrip_preserves_everything() {
        let codec = SprintCodec::default();
        let state = StoreState::new(
            vec![
                sprint("1", date(2024, 1, 1), date(2024, 1, 14), Some("Kickoff")),
                sprint("2", date(2024, 1, 10), date(2024, 1, 28), None),
                sprint("3", date(2024, 2, 29), date(2024, 2, 29), None),
            ],
            7,
        );

        let text = codec.encode_state(&state).unwrap();
        let decoded = codec.decode_state(&text, RecordPolicy::Strict).unwrap();

        assert_eq!(decoded.value, state);
        assert!(decoded.rejected.is_empty());
    }

    #[test]
    fn test_empty_state_roundtrip() {
        let codec = SprintCodec::default();
        let state = StoreState::default();
        let text = codec.encode_state(&state).unwrap();
        assert_eq!(text, r#"{"sprints":[],"colorIndex":0}"#);
        assert_eq!(codec.decode_state(&text, RecordPolicy::Strict).unwrap().value, state);
    }

    #[test]
    fn test_encoded_shape() {
        let codec = SprintCodec::default();
        let state = StoreState::new(vec![sprint("1", date(2024, 1, 1), date(2024, 1, 14), None)], 1);

        let value: Value = serde_json::from_str(&codec.encode_state(&state).unwrap()).unwrap();
        let record = &value["sprints"][0];
        assert_eq!(value["colorIndex"], 1);
        assert_eq!(record["id"], "1");
        assert_eq!(record["startDate"], "2024-01-01T00:00:00.000Z");
        assert_eq!(record["endDate"], "2024-01-14T00:00:00.000Z");
        assert!(record.get("description").is_none());
    }

    #[test]
    fn test_decode_state_rejects_malformed_text() {
        let codec = SprintCodec::default();
        for text in [
            "{ not json",
            r#"{"sprints": []}"#,
            r#"{"colorIndex": 0}"#,
            r#"{"sprints": {}, "colorIndex": 0}"#,
            r#"{"sprints": [], "colorIndex": -1}"#,
            r#"{"sprints": [{"id": "1", "name": "x"}], "colorIndex": 0}"#,
        ] {
            let err = codec.decode_state(text, RecordPolicy::SkipInvalid).unwrap_err();
            assert!(err.is_corrupt_data(), "expected corrupt data for {}", text);
        }
    }

    #[test]
    fn test_unparseable_date_strict_aborts() {
        let codec = SprintCodec::default();
        let text = r##"{"sprints": [{"id": "1", "name": "x", "startDate": "soon",
            "endDate": "2024-01-01T00:00:00.000Z", "color": "#3b82f6"}], "colorIndex": 0}"##;
        assert!(codec
            .decode_state(text, RecordPolicy::Strict)
            .unwrap_err()
            .is_corrupt_data());
    }

    #[test]
    fn test_unparseable_date_skipped_keeps_other_records() {
        let codec = SprintCodec::default();
        let text = r##"{"sprints": [
            {"id": "far", "name": "Far", "startDate": "+010000-01-01T00:00:00.000Z",
             "endDate": "+010000-01-14T00:00:00.000Z", "color": "#3b82f6"},
            {"id": "ok", "name": "Ok", "startDate": "2024-01-01T00:00:00.000Z",
             "endDate": "2024-01-14T00:00:00.000Z", "color": "#ef4444"}
        ], "colorIndex": 2}"##;

        let decoded = codec.decode_state(text, RecordPolicy::SkipInvalid).unwrap();
        assert_eq!(decoded.value.sprints.len(), 1);
        assert_eq!(decoded.value.sprints[0].id.as_str(), "ok");
        assert_eq!(decoded.value.color_index, 2);
        assert_eq!(decoded.rejected.len(), 1);
        assert_eq!(decoded.rejected[0].id, "far");
        assert!(decoded.rejected[0].reason.contains("unrecognized date"));
    }

    #[test]
    fn test_duplicate_ids_strict_aborts() {
        let codec = SprintCodec::default();
        let text = codec
            .encode_export(&[
                sprint("dup", date(2024, 1, 1), date(2024, 1, 14), None),
                sprint("dup", date(2024, 2, 1), date(2024, 2, 14), None),
            ])
            .unwrap();

        let err = codec.decode_import(&text, RecordPolicy::Strict).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("duplicate sprint id dup"));
    }

    #[test]
    fn test_duplicate_ids_skipped_keep_first() {
        let codec = SprintCodec::default();
        let state = StoreState::new(
            vec![
                sprint("dup", date(2024, 1, 1), date(2024, 1, 14), Some("first")),
                sprint("other", date(2024, 1, 15), date(2024, 1, 28), None),
                sprint("dup", date(2024, 2, 1), date(2024, 2, 14), Some("second")),
            ],
            3,
        );
        let text = codec.encode_state(&state).unwrap();

        let decoded = codec.decode_state(&text, RecordPolicy::SkipInvalid).unwrap();
        let ids: Vec<&str> = decoded.value.sprints.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "other"]);
        assert_eq!(decoded.value.sprints[0].description.as_deref(), Some("first"));
        assert_eq!(decoded.rejected.len(), 1);
        assert_eq!(decoded.rejected[0].index, 2);
    }

    #[test]
    fn test_decode_state_normalizes_color_index() {
        let codec = SprintCodec::default();
        let decoded = codec
            .decode_state(r#"{"sprints": [], "colorIndex": 23}"#, RecordPolicy::Strict)
            .unwrap();
        assert_eq!(decoded.value.color_index, 3);
    }

    #[test]
    fn test_null_description_is_absent() {
        let codec = SprintCodec::default();
        let text = r##"[{"id": "1", "name": "x", "description": null,
            "startDate": "2024-01-01T00:00:00.000Z", "endDate": "2024-01-02T00:00:00.000Z",
            "color": "#3b82f6"}]"##;
        let decoded = codec.decode_import(text, RecordPolicy::Strict).unwrap();
        assert_eq!(decoded.value[0].description, None);
    }

    #[test]
    fn test_inverted_record_strict_aborts() {
        let codec = SprintCodec::default();
        let text = codec
            .encode_export(&[
                sprint("ok", date(2024, 1, 1), date(2024, 1, 2), None),
                sprint("bad", date(2024, 2, 1), date(2024, 1, 1), None),
            ])
            .unwrap();

        let err = codec.decode_import(&text, RecordPolicy::Strict).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_inverted_record_skipped_and_reported() {
        let codec = SprintCodec::default();
        let state = StoreState::new(
            vec![
                sprint("ok", date(2024, 1, 1), date(2024, 1, 2), None),
                sprint("bad", date(2024, 2, 1), date(2024, 1, 1), None),
            ],
            2,
        );
        let text = codec.encode_state(&state).unwrap();

        let decoded = codec.decode_state(&text, RecordPolicy::SkipInvalid).unwrap();
        assert_eq!(decoded.value.sprints.len(), 1);
        assert_eq!(decoded.value.sprints[0].id.as_str(), "ok");
        assert_eq!(decoded.rejected.len(), 1);
        assert_eq!(decoded.rejected[0].index, 1);
        assert_eq!(decoded.rejected[0].id, "bad");
    }

    #[test]
    fn test_export_is_bare_array_and_imports_back() {
        let codec = SprintCodec::default();
        let sprints = vec![
            sprint("1", date(2024, 1, 1), date(2024, 1, 14), Some("Planning")),
            sprint("2", date(2024, 1, 5), date(2024, 1, 20), None),
        ];

        let text = codec.encode_export(&sprints).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_array());
        assert!(text.contains('\n'));

        let decoded = codec.decode_import(&text, RecordPolicy::Strict).unwrap();
        assert_eq!(decoded.value, sprints);
    }

    #[test]
    fn test_import_rejects_envelope() {
        let codec = SprintCodec::default();
        let envelope = codec.encode_state(&StoreState::default()).unwrap();

        let err = codec.decode_import(&envelope, RecordPolicy::Strict).unwrap_err();
        assert!(err.is_corrupt_data());
        assert!(err.to_string().contains("envelope"));
    }

    #[test]
    fn test_import_accepts_offset_timestamps() {
        let codec = SprintCodec::default();
        let text = r##"[{"id": "1700000000000", "name": "Legacy",
            "startDate": "2023-12-31T23:00:00.000-01:00", "endDate": "2024-01-07",
            "color": "#ef4444"}]"##;

        let decoded = codec.decode_import(text, RecordPolicy::Strict).unwrap();
        let imported = &decoded.value[0];
        assert_eq!(imported.id.as_str(), "1700000000000");
        assert_eq!(imported.start_date, date(2023, 12, 31));
        assert_eq!(imported.end_date, date(2024, 1, 7));
    }

    #[test]
    fn test_import_rejects_wrong_types() {
        let codec = SprintCodec::default();
        let text = r##"[{"id": 5, "name": "x", "startDate": "2024-01-01",
            "endDate": "2024-01-02", "color": "#ef4444"}]"##;
        assert!(codec
            .decode_import(text, RecordPolicy::Strict)
            .unwrap_err()
            .is_corrupt_data());
    }
}
