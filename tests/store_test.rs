use serde_json::{Value, json};
use spotbrainz::{
    management::{DEFAULT_COLLECTION, Key, Store, StoreError, TRACKS},
    types::Record,
};
use tempfile::tempdir;

fn create_test_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("record must be an object"),
    }
}

#[test]
fn test_upsert_by_id_merges_fields() {
    let mut store = Store::in_memory();
    let tracks = store.collection(TRACKS);

    tracks.upsert_by_id(create_test_record(json!({ "id": "t1", "name": "One", "popularity": 10 })));
    tracks.upsert_by_id(create_test_record(json!({ "id": "t2", "name": "Two" })));
    let merged = tracks
        .upsert_by_id(create_test_record(json!({ "id": "t1", "played_at": "2026-10-13T10:00:00.000Z", "popularity": 11 })))
        .unwrap();

    assert_eq!(merged["name"], json!("One"));
    assert_eq!(merged["popularity"], json!(11));
    assert_eq!(merged["played_at"], json!("2026-10-13T10:00:00.000Z"));

    // Insertion order is kept
    let ids: Vec<&Value> = store.all(TRACKS).iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
}

#[test]
fn test_upsert_same_record_twice_is_idempotent() {
    let mut store = Store::in_memory();
    let record = create_test_record(json!({ "id": "t1", "name": "One" }));

    store.collection(TRACKS).upsert_by_id(record.clone());
    let before = store.all(TRACKS).to_vec();
    store.collection(TRACKS).upsert_by_id(record);

    assert_eq!(store.all(TRACKS), before.as_slice());
}

#[test]
fn test_upsert_by_id_rejects_records_without_id() {
    let mut store = Store::in_memory();
    let tracks = store.collection(TRACKS);

    assert!(tracks.upsert_by_id(create_test_record(json!({ "name": "anonymous" }))).is_none());
    assert!(tracks.upsert_by_id(create_test_record(json!({ "id": 7 }))).is_none());
    assert!(tracks.is_empty());
}

#[test]
fn test_upsert_by_name_key() {
    let mut store = Store::in_memory();
    let defaults = store.collection(DEFAULT_COLLECTION);

    defaults.upsert(create_test_record(json!({ "name": "a", "v": 1 })), Key::Name("a"));
    defaults.upsert(create_test_record(json!({ "name": "a", "v": 2 })), Key::Name("a"));

    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults.find(Key::Name("a")).unwrap()["v"], json!(2));
    assert!(defaults.find(Key::Id("a")).is_none());
}

#[test]
fn test_metadata_singleton() {
    let mut store = Store::in_memory();
    assert!(store.get("__playlist_meta__").is_none());

    store.upsert(
        "__playlist_meta__",
        create_test_record(json!({ "record": { "id": "pl1" } })),
    );
    store.upsert(
        "__playlist_meta__",
        create_test_record(json!({ "record": { "id": "pl2" } })),
    );

    let meta = store.get("__playlist_meta__").unwrap();
    assert_eq!(meta["name"], json!("__playlist_meta__"));
    assert_eq!(meta["record"]["id"], json!("pl2"));
    assert_eq!(store.all(DEFAULT_COLLECTION).len(), 1);
}

#[test]
fn test_unknown_collection_is_empty() {
    let store = Store::in_memory();
    assert!(store.all("nope").is_empty());
    assert_eq!(store.collections().count(), 0);
}

#[test]
fn test_purge_drops_every_collection() {
    let mut store = Store::in_memory();
    store
        .collection(TRACKS)
        .upsert_by_id(create_test_record(json!({ "id": "t1" })));
    store.upsert("meta", Record::new());

    store.purge();

    assert!(store.all(TRACKS).is_empty());
    assert!(store.get("meta").is_none());
    assert_eq!(store.collections().count(), 0);
}

#[tokio::test]
async fn test_persist_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("spot.json");

    let mut store = Store::open(path.clone()).await.unwrap();
    assert_eq!(store.collections().count(), 0);

    store
        .collection(TRACKS)
        .upsert_by_id(create_test_record(json!({ "id": "t1", "name": "One" })));
    store.upsert("meta", create_test_record(json!({ "record": { "id": "pl1" } })));
    store.persist().await.unwrap();

    let reopened = Store::open(path).await.unwrap();
    assert_eq!(reopened.all(TRACKS), store.all(TRACKS));
    assert_eq!(reopened.get("meta").unwrap()["record"]["id"], json!("pl1"));

    let names: Vec<&str> = reopened.collections().map(|(name, _)| name).collect();
    assert_eq!(names, vec![DEFAULT_COLLECTION, TRACKS]);
}

#[tokio::test]
async fn test_open_blank_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spot.json");
    std::fs::write(&path, "  \n").unwrap();

    let store = Store::open(path).await.unwrap();
    assert_eq!(store.collections().count(), 0);
}

#[tokio::test]
async fn test_open_invalid_json_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spot.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Store::open(path).await;
    assert!(matches!(result, Err(StoreError::SerdeError(_))));
}

#[tokio::test]
async fn test_in_memory_store_never_writes() {
    let mut store = Store::in_memory();
    store.upsert("meta", Record::new());
    assert!(store.persist().await.is_ok());
}
