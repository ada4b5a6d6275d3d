use kasa_core::ledger::{Document, Group};
use uuid::Uuid;

/// Builds a document holding a single group with the given baseline value.
pub fn doc_with_group(name: &str, value: f64) -> (Document, Uuid) {
    let mut doc = Document::empty();
    let group = Group::new(name, value);
    let id = group.id;
    doc.groups.push(group);
    (doc, id)
}
