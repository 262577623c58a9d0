use super::*;
use serde_json::json;

#[tokio::test]
async fn test_create_makes_directory_and_empty_file() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(tmp.path().join("nested").join("zbind"), "keybindings.json");

    assert!(!storage.exists().await);
    storage.create().await.unwrap();

    assert!(storage.exists().await);
    assert_eq!(std::fs::read_to_string(storage.path()).unwrap(), "");
    assert_eq!(storage.read_document().await.unwrap(), None);
}

#[tokio::test]
async fn test_write_then_read_document() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(tmp.path(), "keybindings.json");
    storage.create().await.unwrap();

    storage.write("{\n    \"save\": \"Ctrl-S\"\n}").await.unwrap();

    assert_eq!(
        storage.read_document().await.unwrap(),
        Some(json!({"save": "Ctrl-S"}))
    );
}

#[tokio::test]
async fn test_invalid_json_reads_as_none() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(tmp.path(), "keybindings.json");
    std::fs::write(storage.path(), "{ not json").unwrap();

    assert_eq!(storage.read_document().await.unwrap(), None);
}

#[tokio::test]
async fn test_read_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(tmp.path(), "missing.json");

    let err = storage.read_document().await.unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[tokio::test]
async fn test_create_rejects_empty_file_name() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(tmp.path(), "");
    let err = storage.create().await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidPath(_)));
}

#[tokio::test]
async fn memory_storage_clones_share_document() {
    let storage = MemoryStorage::new();
    let other = storage.clone();
    assert!(!other.exists().await);

    storage.create().await.unwrap();
    assert!(other.exists().await);
    assert_eq!(other.read_document().await.unwrap(), None);

    storage.write(r#"{"find": "Ctrl-F"}"#).await.unwrap();
    assert_eq!(
        other.read_document().await.unwrap(),
        Some(json!({"find": "Ctrl-F"}))
    );
    assert_eq!(other.writes(), 1);
}

#[tokio::test]
async fn memory_storage_create_keeps_existing_text() {
    let storage = MemoryStorage::with_text("{}");
    storage.create().await.unwrap();
    assert_eq!(storage.text().as_deref(), Some("{}"));
}
