use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{group::Group, history::HistoryRecord};

/// Well-known key the document is persisted under, kept verbatim from the
/// original tracker so existing blobs load unchanged.
pub const STORAGE_KEY: &str = "telefon_harcama_gruplari_v1";

/// Root state of the shared cash pool and the sole unit of truth.
///
/// Groups and history records are owned here and referenced by id only.
/// Every field carries a default, giving the shallow merge over the starter
/// state: a blob missing any top-level key loads as if that key had never
/// been written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub groups: Vec<Group>,
    /// Committed entries, newest first.
    pub history: Vec<HistoryRecord>,
    pub last_reset_at: Option<DateTime<Utc>>,
    pub auto_backup_enabled: bool,
    pub last_auto_backup_at: Option<DateTime<Utc>>,
    pub dark_mode: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::starter()
    }
}

impl Document {
    /// First-load state: the two seed groups of the original tracker.
    pub fn starter() -> Self {
        Self {
            groups: vec![Group::new("150", 150.0), Group::new("300", 300.0)],
            history: Vec::new(),
            last_reset_at: None,
            auto_backup_enabled: false,
            last_auto_backup_at: None,
            dark_mode: false,
        }
    }

    /// A document without any groups. Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            groups: Vec::new(),
            ..Self::starter()
        }
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    pub fn record(&self, id: Uuid) -> Option<&HistoryRecord> {
        self.history.iter().find(|record| record.id == id)
    }

    pub fn record_mut(&mut self, id: Uuid) -> Option<&mut HistoryRecord> {
        self.history.iter_mut().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_has_the_two_seed_groups() {
        let doc = Document::starter();
        assert_eq!(doc.groups.len(), 2);
        assert_eq!(doc.groups[0].name, "150");
        assert_eq!(doc.groups[0].value, 150.0);
        assert_eq!(doc.groups[1].name, "300");
        assert_eq!(doc.groups[1].value, 300.0);
        assert!(doc.history.is_empty());
        assert!(doc.last_reset_at.is_none());
    }

    #[test]
    fn missing_top_level_keys_fall_back() {
        let doc: Document = serde_json::from_str(r#"{"groups": [], "history": []}"#).unwrap();
        assert!(doc.groups.is_empty());
        assert!(!doc.auto_backup_enabled);
        assert!(!doc.dark_mode);
        assert!(doc.last_auto_backup_at.is_none());
    }

    #[test]
    fn blob_without_groups_key_gets_seed_groups() {
        let doc: Document = serde_json::from_str(r#"{"history": []}"#).unwrap();
        assert_eq!(doc.groups.len(), 2);
    }
}
