use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::group::{Group, NeedTag};

/// One committed entry in the cash-pool ledger.
///
/// Snapshots the group's name and value at commit time, so later edits to the
/// group never rewrite past history. `input`, `delta`, and the snapshot
/// fields are immutable once recorded; only `note` and `need` may be amended
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub ts: DateTime<Utc>,
    /// Soft back-reference. The group may have been deleted since; the record
    /// stands on its own snapshot.
    pub group_id: Uuid,
    pub group_name_at_the_time: String,
    pub group_value_at_the_time: f64,
    pub input: f64,
    /// `groupValueAtTheTime - input`: the amount credited or debited to the
    /// shared total by this entry.
    pub delta: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub need: NeedTag,
}

impl HistoryRecord {
    /// Commits `input` against the given group snapshot.
    pub fn commit(group: &Group, input: f64, need: NeedTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            ts: Utc::now(),
            group_id: group.id,
            group_name_at_the_time: group.name.clone(),
            group_value_at_the_time: group.value,
            input,
            delta: group.value - input,
            note: String::new(),
            need,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_snapshots_the_group() {
        let mut group = Group::new("150", 150.0);
        let record = HistoryRecord::commit(&group, 70.0, NeedTag::Gerekli);

        group.name = "renamed".into();
        group.value = 999.0;

        assert_eq!(record.group_name_at_the_time, "150");
        assert_eq!(record.group_value_at_the_time, 150.0);
        assert_eq!(record.delta, 80.0);
    }

    #[test]
    fn record_without_need_defaults_to_gerekli() {
        let raw = r#"{
            "id": "7f0c463b-8f1c-4be8-9f6d-0d8b1f6f5f10",
            "ts": "2024-01-01T00:00:00Z",
            "groupId": "3f0c463b-8f1c-4be8-9f6d-0d8b1f6f5f10",
            "groupNameAtTheTime": "150",
            "groupValueAtTheTime": 150,
            "input": 70,
            "delta": 80,
            "note": ""
        }"#;
        let record: HistoryRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.need, NeedTag::Gerekli);
    }
}
