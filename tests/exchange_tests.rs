mod common;

use common::doc_with_group;
use kasa_core::errors::KasaError;
use kasa_core::ledger::NeedTag;
use kasa_core::services::{GroupService, LedgerService};
use kasa_core::storage::{export_document, import_document, JsonStorage, Store};
use tempfile::TempDir;

#[test]
fn import_of_an_export_is_identity() {
    let (mut doc, id) = doc_with_group("Market", 250.0);
    GroupService::queue_pending(&mut doc, id, "12.5", NeedTag::Fuzuli).expect("queue");
    LedgerService::commit_direct(&mut doc, id, "90", NeedTag::Zorunlu).expect("commit");
    let record_id = doc.history[0].id;
    LedgerService::update_record(
        &mut doc,
        record_id,
        kasa_core::services::HistoryPatch {
            note: Some("iade".into()),
            need: None,
        },
    );
    doc.dark_mode = true;
    doc.auto_backup_enabled = true;

    let text = export_document(&doc).expect("export");
    let imported = import_document(&text).expect("import");
    assert_eq!(imported, doc);
}

#[test]
fn export_is_pretty_printed_with_legacy_keys() {
    let (mut doc, id) = doc_with_group("150", 150.0);
    LedgerService::commit_direct(&mut doc, id, "70", NeedTag::Gerekli).expect("commit");

    let text = export_document(&doc).expect("export");
    assert!(text.contains('\n'));
    assert!(text.contains("\"groupValueAtTheTime\""));
    assert!(text.contains("\"lastResetAt\""));
    assert!(text.contains("\"darkMode\""));
}

#[test]
fn import_replaces_the_document_wholesale() {
    let dir = TempDir::new().expect("temp dir");
    let storage = JsonStorage::new(dir.path().to_path_buf()).expect("json storage");
    let mut store = Store::open(Box::new(storage));
    assert_eq!(store.document().groups.len(), 2);

    let (incoming, _) = doc_with_group("tek", 42.0);
    let text = export_document(&incoming).expect("export");
    store.import(&text).expect("import");

    assert_eq!(store.document(), &incoming);
    assert_eq!(store.document().groups.len(), 1);

    // The replacement is also what got persisted.
    let reopened = Store::open(Box::new(
        JsonStorage::new(dir.path().to_path_buf()).expect("json storage"),
    ));
    assert_eq!(reopened.document(), &incoming);
}

#[test]
fn failed_import_leaves_the_document_untouched() {
    let dir = TempDir::new().expect("temp dir");
    let storage = JsonStorage::new(dir.path().to_path_buf()).expect("json storage");
    let mut store = Store::open(Box::new(storage));
    let before = store.document().clone();

    assert!(matches!(
        store.import("çöp"),
        Err(KasaError::InvalidFormat(_))
    ));
    assert!(matches!(
        store.import(r#"{"groups": []}"#),
        Err(KasaError::MissingFields(_))
    ));
    assert_eq!(store.document(), &before);
}

#[test]
fn legacy_first_version_export_imports_cleanly() {
    // Shape written by the earliest tracker version: no pending, color,
    // need, or settings keys anywhere.
    let raw = r#"{
        "groups": [
            {
                "id": "3f0c463b-8f1c-4be8-9f6d-0d8b1f6f5f10",
                "name": "150",
                "value": 150,
                "note": "",
                "ticked": false,
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-01T00:00:00.000Z"
            }
        ],
        "history": [
            {
                "id": "7f0c463b-8f1c-4be8-9f6d-0d8b1f6f5f10",
                "ts": "2024-01-02T10:30:00.000Z",
                "groupId": "3f0c463b-8f1c-4be8-9f6d-0d8b1f6f5f10",
                "groupNameAtTheTime": "150",
                "groupValueAtTheTime": 150,
                "input": 70,
                "delta": 80,
                "note": "market"
            }
        ],
        "lastResetAt": null
    }"#;

    let doc = import_document(raw).expect("legacy import");
    assert_eq!(doc.groups[0].color, "slate");
    assert!(doc.groups[0].pending.is_empty());
    assert_eq!(doc.history[0].need, NeedTag::Gerekli);
    assert!(!doc.dark_mode);
    assert_eq!(kasa_core::services::SummaryService::total(&doc), 80.0);
}
