use chrono::Utc;
use uuid::Uuid;

use crate::errors::Result;
use crate::ledger::{Document, HistoryRecord, NeedTag, PendingEntry};
use crate::utils::parse_amount;

/// Partial update for a committed record. Only the amendable fields appear;
/// the recorded input, snapshot, and delta cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct HistoryPatch {
    pub note: Option<String>,
    pub need: Option<NeedTag>,
}

/// Operations that move value into the ledger: batch application, direct
/// commits, record amendments, and the explicit reset.
pub struct LedgerService;

impl LedgerService {
    /// Commits every pending entry of the group, in insertion order, against
    /// a single snapshot of the group taken at call time, then empties the
    /// queue.
    ///
    /// History is stored newest-first, so after the batch the last queued
    /// entry sits at the head.
    pub fn apply_pending(doc: &mut Document, group_id: Uuid) {
        let Some(group) = doc.group_mut(group_id) else {
            return;
        };
        if group.pending.is_empty() {
            return;
        }
        let entries: Vec<PendingEntry> = group.pending.drain(..).collect();
        group.touch();
        let snapshot = group.clone();
        for entry in entries {
            let record = HistoryRecord::commit(&snapshot, entry.amount, entry.need);
            doc.history.insert(0, record);
        }
    }

    /// Single-input variant: parse, commit, done. The pending queue is not
    /// involved.
    pub fn commit_direct(
        doc: &mut Document,
        group_id: Uuid,
        raw_input: &str,
        need: NeedTag,
    ) -> Result<()> {
        let input = parse_amount(raw_input)?;
        let Some(group) = doc.group(group_id) else {
            return Ok(());
        };
        let record = HistoryRecord::commit(group, input, need);
        doc.history.insert(0, record);
        Ok(())
    }

    /// Amends a record's note and tag. Unknown ids are ignored.
    pub fn update_record(doc: &mut Document, id: Uuid, patch: HistoryPatch) {
        let Some(record) = doc.record_mut(id) else {
            return;
        };
        if let Some(note) = patch.note {
            record.note = note;
        }
        if let Some(need) = patch.need {
            record.need = need;
        }
    }

    /// Clears the ledger and stamps the reset time. Groups, including their
    /// pending queues, are untouched.
    pub fn reset(doc: &mut Document) {
        doc.history.clear();
        doc.last_reset_at = Some(Utc::now());
    }
}
