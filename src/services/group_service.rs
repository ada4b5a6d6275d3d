use uuid::Uuid;

use crate::errors::Result;
use crate::ledger::{Document, Group, NeedTag, PendingEntry, DEFAULT_GROUP_NAME};
use crate::utils::parse_amount;

/// Partial update for a group; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub note: Option<String>,
    pub color: Option<String>,
    pub ticked: Option<bool>,
}

/// Group lifecycle and pending-queue operations.
pub struct GroupService;

impl GroupService {
    /// Appends a fresh zero-valued group and returns its id.
    pub fn add(doc: &mut Document) -> Uuid {
        let group = Group::new(DEFAULT_GROUP_NAME, 0.0);
        let id = group.id;
        doc.groups.push(group);
        id
    }

    /// Merges `patch` into the matching group and bumps its edit timestamp.
    /// Unknown ids are ignored.
    pub fn edit(doc: &mut Document, id: Uuid, patch: GroupPatch) {
        let Some(group) = doc.group_mut(id) else {
            return;
        };
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(value) = patch.value {
            group.value = value;
        }
        if let Some(note) = patch.note {
            group.note = note;
        }
        if let Some(color) = patch.color {
            group.color = color;
        }
        if let Some(ticked) = patch.ticked {
            group.ticked = ticked;
        }
        group.touch();
    }

    /// Applies the edit form: rename, revalue, and note in one step.
    ///
    /// The new value must parse as a finite number. A name that is empty
    /// after trimming falls back to the stringified value as the display
    /// name.
    pub fn edit_details(
        doc: &mut Document,
        id: Uuid,
        name: &str,
        raw_value: &str,
        note: &str,
    ) -> Result<()> {
        let value = parse_amount(raw_value)?;
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            value.to_string()
        } else {
            trimmed.to_string()
        };
        Self::edit(
            doc,
            id,
            GroupPatch {
                name: Some(name),
                value: Some(value),
                note: Some(note.to_string()),
                ..GroupPatch::default()
            },
        );
        Ok(())
    }

    /// Removes the group. History referencing it is retained untouched;
    /// deletion never cascades.
    pub fn remove(doc: &mut Document, id: Uuid) {
        doc.groups.retain(|group| group.id != id);
    }

    /// Queues an uncommitted input on the group. The total is unaffected
    /// until the queue is applied.
    pub fn queue_pending(
        doc: &mut Document,
        group_id: Uuid,
        raw_amount: &str,
        need: NeedTag,
    ) -> Result<()> {
        let amount = parse_amount(raw_amount)?;
        let Some(group) = doc.group_mut(group_id) else {
            return Ok(());
        };
        group.pending.push(PendingEntry::new(amount, need));
        group.touch();
        Ok(())
    }

    pub fn remove_pending(doc: &mut Document, group_id: Uuid, pending_id: Uuid) {
        let Some(group) = doc.group_mut(group_id) else {
            return;
        };
        group.pending.retain(|entry| entry.id != pending_id);
        group.touch();
    }

    pub fn clear_pending(doc: &mut Document, group_id: Uuid) {
        let Some(group) = doc.group_mut(group_id) else {
            return;
        };
        group.pending.clear();
        group.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_falls_back_to_stringified_value() {
        let mut doc = Document::empty();
        let id = GroupService::add(&mut doc);

        GroupService::edit_details(&mut doc, id, "   ", "150", "").unwrap();
        assert_eq!(doc.group(id).unwrap().name, "150");

        GroupService::edit_details(&mut doc, id, "", "150.5", "").unwrap();
        assert_eq!(doc.group(id).unwrap().name, "150.5");
    }

    #[test]
    fn unparsable_value_rejects_the_edit() {
        let mut doc = Document::empty();
        let id = GroupService::add(&mut doc);
        let before = doc.clone();

        let err = GroupService::edit_details(&mut doc, id, "Market", "abc", "");
        assert!(err.is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn edit_on_unknown_id_is_a_no_op() {
        let mut doc = Document::starter();
        let before = doc.clone();
        GroupService::edit(
            &mut doc,
            Uuid::new_v4(),
            GroupPatch {
                name: Some("ghost".into()),
                ..GroupPatch::default()
            },
        );
        assert_eq!(doc, before);
    }
}
