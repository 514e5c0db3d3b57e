//! End-to-end tests for the note store.

use notes_store::{NoteService, StoreConfig, StoreError, UpsertNoteRequest};

use std::collections::HashSet;

async fn open_store() -> NoteService {
    notes_store::logging::init_test();
    let service = NoteService::from_config(&StoreConfig::in_memory());
    service.init().await.expect("in-memory store should open");
    service
}

fn titles(notes: &[notes_store::Note]) -> Vec<&str> {
    notes.iter().map(|n| n.title.as_str()).collect()
}

#[tokio::test]
async fn shopping_and_work_scenario() {
    let service = open_store().await;

    let shopping = service
        .upsert(UpsertNoteRequest::new("Shopping", "milk"))
        .await
        .unwrap();
    let work = service
        .upsert(UpsertNoteRequest::new("Work", "report"))
        .await
        .unwrap();
    assert_eq!((shopping, work), (1, 2));

    assert_eq!(titles(&service.list("").await.unwrap()), vec!["Work", "Shopping"]);
    assert_eq!(titles(&service.list("shop").await.unwrap()), vec!["Shopping"]);

    service.remove(shopping).await.unwrap();
    assert_eq!(titles(&service.list("").await.unwrap()), vec!["Work"]);
}

#[tokio::test]
async fn created_ids_are_distinct_across_deletes() {
    let service = open_store().await;
    let mut seen = HashSet::new();

    for round in 0..5 {
        let id = service
            .upsert(UpsertNoteRequest::new(format!("note {round}"), "body"))
            .await
            .unwrap();
        assert!(seen.insert(id), "id {id} was handed out twice");
        service.remove(id).await.unwrap();
    }

    let id = service
        .upsert(UpsertNoteRequest::new("last", "body"))
        .await
        .unwrap();
    assert!(!seen.contains(&id));
}

#[tokio::test]
async fn update_replaces_note_and_refreshes_timestamp() {
    let service = open_store().await;
    let id = service
        .upsert(UpsertNoteRequest::new("Draft", "first"))
        .await
        .unwrap();
    let before = service.get(id).await.unwrap().unwrap();

    let returned = service
        .upsert(UpsertNoteRequest::new("Final", "second").with_id(id))
        .await
        .unwrap();
    assert_eq!(returned, id);

    let after = service.get(id).await.unwrap().unwrap();
    assert_eq!(after.title, "Final");
    assert_eq!(after.content, "second");
    assert!(after.timestamp.is_some());
    assert!(after.timestamp >= before.timestamp);
    assert_eq!(service.list("").await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_of_unknown_id_is_a_silent_no_op() {
    let service = open_store().await;

    let returned = service
        .upsert(UpsertNoteRequest::new("Ghost", "boo").with_id(99))
        .await
        .unwrap();
    assert_eq!(returned, 99);
    assert!(service.get(99).await.unwrap().is_none());
    assert!(service.list("").await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_then_get_is_empty_and_missing_ids_are_fine() {
    let service = open_store().await;
    let id = service
        .upsert(UpsertNoteRequest::new("Temp", "x"))
        .await
        .unwrap();

    service.remove(id).await.unwrap();
    assert!(service.get(id).await.unwrap().is_none());

    service.remove(id).await.unwrap();
    service.remove(12345).await.unwrap();
}

#[tokio::test]
async fn list_filters_titles_case_insensitively_newest_first() {
    let service = open_store().await;
    for (title, content) in [
        ("abc list", "1"),
        ("Other", "abc in content only"),
        ("xABCx", "2"),
        ("AbC", "3"),
    ] {
        service
            .upsert(UpsertNoteRequest::new(title, content))
            .await
            .unwrap();
    }

    let all = service.list("").await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let matches = service.list("abc").await.unwrap();
    assert_eq!(titles(&matches), vec!["AbC", "xABCx", "abc list"]);
}

#[tokio::test]
async fn blank_fields_are_rejected_without_writing() {
    let service = open_store().await;

    let err = service
        .upsert(UpsertNoteRequest::new("  ", "body"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidNote(_)));
    assert!(service.list("").await.unwrap().is_empty());
}

#[tokio::test]
async fn init_twice_creates_schema_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at(dir.path().join("NotesDB.sqlite3"));

    let service = NoteService::from_config(&config);
    service.init().await.unwrap();
    service.init().await.unwrap();

    // A second handle re-runs migrations against the existing file.
    let other = NoteService::from_config(&config);
    other.init().await.unwrap();

    let info = other.schema_info().await.unwrap();
    assert_eq!(info.version, Some(1));
    assert_eq!(info.collections, vec!["notes".to_string()]);
    assert_eq!(info.indexes, vec!["idx_notes_title".to_string()]);
}

#[tokio::test]
async fn notes_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at(dir.path().join("NotesDB.sqlite3"));

    let first_id = {
        let service = NoteService::from_config(&config);
        service.init().await.unwrap();
        let id = service
            .upsert(UpsertNoteRequest::new("Persisted", "kept"))
            .await
            .unwrap();
        service.remove(id).await.unwrap();
        service
            .upsert(UpsertNoteRequest::new("Persisted", "kept"))
            .await
            .unwrap()
    };

    let service = NoteService::from_config(&config);
    service.init().await.unwrap();

    let notes = service.list("").await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, first_id);
    assert_eq!(notes[0].content, "kept");

    let next = service
        .upsert(UpsertNoteRequest::new("Later", "new"))
        .await
        .unwrap();
    assert!(next > first_id);
}

#[tokio::test]
async fn unopenable_store_fails_for_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at(dir.path().join("no-such-dir").join("NotesDB.sqlite3"));
    let service = NoteService::from_config(&config);

    assert!(matches!(service.init().await, Err(StoreError::OpenFailed(_))));
    assert!(matches!(service.init().await, Err(StoreError::OpenFailed(_))));
    assert!(matches!(service.list("").await, Err(StoreError::ReadFailed(_))));
    assert!(matches!(
        service.upsert(UpsertNoteRequest::new("a", "b")).await,
        Err(StoreError::WriteFailed(_))
    ));
}

#[tokio::test]
async fn calls_before_init_are_reported() {
    let service = NoteService::from_config(&StoreConfig::in_memory());
    assert!(matches!(service.get(1).await, Err(StoreError::ReadFailed(_))));
    assert!(matches!(service.remove(1).await, Err(StoreError::WriteFailed(_))));
}

#[tokio::test]
async fn notes_serialize_as_flat_records() {
    let service = open_store().await;
    let id = service
        .upsert(UpsertNoteRequest::new("Shopping", "milk"))
        .await
        .unwrap();
    let note = service.get(id).await.unwrap().unwrap();

    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["title"], "Shopping");
    assert_eq!(value["content"], "milk");
    assert!(value["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));
}
