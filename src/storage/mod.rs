pub mod exchange;
pub mod json_backend;

use std::path::PathBuf;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    errors::KasaError,
    ledger::{Document, NeedTag},
    services::{GroupPatch, GroupService, HistoryPatch, LedgerService},
};

pub type Result<T> = std::result::Result<T, KasaError>;

/// Days between automatic backups.
const AUTO_BACKUP_INTERVAL_DAYS: i64 = 7;

/// Abstraction over persistence backends capable of storing the document
/// blob and timestamped backups of it.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Document>;
    fn save(&self, doc: &Document) -> Result<()>;
    fn backup(&self, doc: &Document, note: Option<&str>) -> Result<PathBuf>;
    fn list_backups(&self) -> Result<Vec<String>>;
    fn restore(&self, backup_name: &str) -> Result<Document>;
}

pub use exchange::{export_document, export_file_name, import_document};
pub use json_backend::JsonStorage;

/// Owns the live document and persists it after every mutation.
///
/// The rendering collaborator calls these methods as its intent hooks and
/// re-reads [`Store::document`] after each one. Persistence is best-effort: a
/// failed write is logged and the next mutation simply tries again.
pub struct Store {
    document: Document,
    storage: Box<dyn StorageBackend>,
}

impl Store {
    /// Loads the persisted document, falling back to the starter state when
    /// the blob is missing or unreadable.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let document = match storage.load() {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!("loading stored document failed, starting fresh: {err}");
                Document::starter()
            }
        };
        Self { document, storage }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.document) {
            tracing::warn!("persisting document failed, will retry on next change: {err}");
        }
    }

    pub fn add_group(&mut self) -> Uuid {
        let id = GroupService::add(&mut self.document);
        self.persist();
        id
    }

    pub fn edit_group(&mut self, id: Uuid, patch: GroupPatch) {
        GroupService::edit(&mut self.document, id, patch);
        self.persist();
    }

    pub fn edit_group_details(
        &mut self,
        id: Uuid,
        name: &str,
        raw_value: &str,
        note: &str,
    ) -> Result<()> {
        GroupService::edit_details(&mut self.document, id, name, raw_value, note)?;
        self.persist();
        Ok(())
    }

    pub fn delete_group(&mut self, id: Uuid) {
        GroupService::remove(&mut self.document, id);
        self.persist();
    }

    pub fn queue_pending(&mut self, group_id: Uuid, raw_amount: &str, need: NeedTag) -> Result<()> {
        GroupService::queue_pending(&mut self.document, group_id, raw_amount, need)?;
        self.persist();
        Ok(())
    }

    pub fn remove_pending(&mut self, group_id: Uuid, pending_id: Uuid) {
        GroupService::remove_pending(&mut self.document, group_id, pending_id);
        self.persist();
    }

    pub fn clear_pending(&mut self, group_id: Uuid) {
        GroupService::clear_pending(&mut self.document, group_id);
        self.persist();
    }

    pub fn apply_pending(&mut self, group_id: Uuid) {
        LedgerService::apply_pending(&mut self.document, group_id);
        self.persist();
    }

    pub fn commit_direct(&mut self, group_id: Uuid, raw_input: &str, need: NeedTag) -> Result<()> {
        LedgerService::commit_direct(&mut self.document, group_id, raw_input, need)?;
        self.persist();
        Ok(())
    }

    pub fn update_record(&mut self, id: Uuid, patch: HistoryPatch) {
        LedgerService::update_record(&mut self.document, id, patch);
        self.persist();
    }

    pub fn reset(&mut self) {
        LedgerService::reset(&mut self.document);
        self.persist();
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.document.dark_mode = !self.document.dark_mode;
        self.persist();
        self.document.dark_mode
    }

    pub fn set_auto_backup(&mut self, enabled: bool) {
        self.document.auto_backup_enabled = enabled;
        self.persist();
    }

    /// Replaces the whole document with the parsed text, atomically: either
    /// the text is a valid document and becomes the new state, or nothing
    /// changes.
    pub fn import(&mut self, raw: &str) -> Result<()> {
        self.document = import_document(raw)?;
        self.persist();
        Ok(())
    }

    /// Pretty-printed full snapshot for download.
    pub fn export(&self) -> Result<String> {
        export_document(&self.document)
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf> {
        self.storage.backup(&self.document, note)
    }

    pub fn list_backups(&self) -> Result<Vec<String>> {
        self.storage.list_backups()
    }

    pub fn restore(&mut self, backup_name: &str) -> Result<()> {
        self.document = self.storage.restore(backup_name)?;
        self.persist();
        Ok(())
    }

    /// One-shot startup check: writes an automatic backup when enabled and at
    /// least a week has elapsed since the last one. Returns the backup path
    /// when one was written. Failures are swallowed like any save.
    pub fn run_auto_backup_check(&mut self) -> Option<PathBuf> {
        if !self.document.auto_backup_enabled {
            return None;
        }
        let due = match self.document.last_auto_backup_at {
            None => true,
            Some(last) => Utc::now() - last >= Duration::days(AUTO_BACKUP_INTERVAL_DAYS),
        };
        if !due {
            return None;
        }
        match self.storage.backup(&self.document, Some("auto")) {
            Ok(path) => {
                self.document.last_auto_backup_at = Some(Utc::now());
                self.persist();
                Some(path)
            }
            Err(err) => {
                tracing::warn!("automatic backup failed: {err}");
                None
            }
        }
    }
}
