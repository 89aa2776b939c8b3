//! Tests for the filesystem store backend.

use scrivano_core::RequestId;
use scrivano_interface::{ContentStore, Namespace};
use scrivano_store::FileStore;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_put_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    let id = RequestId::mint();

    let value = json!({"title": "Test Article", "wordCount": 42});
    store.put(Namespace::Blog, &id, value.clone()).await.unwrap();

    let read_back = store.get(Namespace::Blog, &id).await.unwrap().unwrap();
    assert_eq!(read_back, value);
}

#[tokio::test]
async fn test_absent_cell_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    let id = RequestId::mint();

    assert!(store.get(Namespace::Tts, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_namespaces_use_separate_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    let id = RequestId::mint();

    store
        .put(Namespace::Blog, &id, json!({"kind": "article"}))
        .await
        .unwrap();
    store
        .put(Namespace::Tts, &id, json!({"kind": "audio"}))
        .await
        .unwrap();

    let blog = store.get(Namespace::Blog, &id).await.unwrap().unwrap();
    let tts = store.get(Namespace::Tts, &id).await.unwrap().unwrap();
    assert_eq!(blog["kind"], "article");
    assert_eq!(tts["kind"], "audio");

    assert!(temp_dir.path().join("blog").join(format!("{}.json", id)).exists());
    assert!(temp_dir.path().join("tts").join(format!("{}.json", id)).exists());
}

#[tokio::test]
async fn test_double_write_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    let id = RequestId::mint();

    store.put(Namespace::Blog, &id, json!(1)).await.unwrap();
    assert!(store.put(Namespace::Blog, &id, json!(2)).await.is_err());

    // First write survives
    let value = store.get(Namespace::Blog, &id).await.unwrap().unwrap();
    assert_eq!(value, json!(1));
}

#[tokio::test]
async fn test_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let id = RequestId::mint();

    {
        let store = FileStore::new(temp_dir.path()).unwrap();
        store
            .put(Namespace::Blog, &id, json!({"persisted": true}))
            .await
            .unwrap();
    }

    let reopened = FileStore::new(temp_dir.path()).unwrap();
    let value = reopened.get(Namespace::Blog, &id).await.unwrap().unwrap();
    assert_eq!(value["persisted"], true);
}
