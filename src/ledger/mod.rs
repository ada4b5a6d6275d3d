pub mod document;
pub mod group;
pub mod history;

pub use document::{Document, STORAGE_KEY};
pub use group::{Group, NeedTag, PendingEntry, DEFAULT_GROUP_COLOR, DEFAULT_GROUP_NAME};
pub use history::HistoryRecord;
