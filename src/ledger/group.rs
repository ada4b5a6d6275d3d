use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name given to freshly created groups.
pub const DEFAULT_GROUP_NAME: &str = "Yeni Grup";
/// Card color assigned to freshly created groups.
pub const DEFAULT_GROUP_COLOR: &str = "slate";

/// A named bucket with an assigned numeric baseline value.
///
/// Serialized with the legacy camelCase keys so blobs written by earlier
/// versions of the tracker load unchanged; fields the earliest version did
/// not write fall back per field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default = "Group::default_color")]
    pub color: String,
    /// Visual marker only. Ticked groups never influence the total.
    #[serde(default)]
    pub ticked: bool,
    /// Queued inputs awaiting batch application, in commit order.
    #[serde(default)]
    pub pending: Vec<PendingEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            note: String::new(),
            color: DEFAULT_GROUP_COLOR.into(),
            ticked: false,
            pending: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn default_color() -> String {
        DEFAULT_GROUP_COLOR.into()
    }
}

/// A queued, uncommitted numeric input with a tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingEntry {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub need: NeedTag,
}

impl PendingEntry {
    pub fn new(amount: f64, need: NeedTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            need,
        }
    }
}

/// Classification of a committed entry: necessary, wasteful, or mandatory.
///
/// Records written without a tag count as [`NeedTag::Gerekli`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NeedTag {
    #[default]
    Gerekli,
    Fuzuli,
    Zorunlu,
}

impl NeedTag {
    pub const ALL: [NeedTag; 3] = [NeedTag::Gerekli, NeedTag::Fuzuli, NeedTag::Zorunlu];

    pub fn as_str(&self) -> &'static str {
        match self {
            NeedTag::Gerekli => "gerekli",
            NeedTag::Fuzuli => "fuzuli",
            NeedTag::Zorunlu => "zorunlu",
        }
    }
}

impl fmt::Display for NeedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
