//! Tests for the form store (in-memory SQLite).

use std::path::PathBuf;

use crate::form_list::FormListEntry;
use crate::store::{open_memory, FormRecord, FormStatus};

const HASH_A: &str = "md5:0cc175b9c0f1b6a831c399e269772661";
const HASH_B: &str = "md5:92eb5ffee6ae2fec3ad71c777531578f";

fn record(form_id: &str, hash: &str) -> FormRecord {
    FormRecord {
        form_id: form_id.to_string(),
        version: Some("1".to_string()),
        name: "One Question".to_string(),
        hash: hash.to_string(),
        form_path: PathBuf::from(format!("/forms/{}.xml", form_id)),
        media_dir: None,
    }
}

fn entry(form_id: &str, hash: Option<&str>) -> FormListEntry {
    FormListEntry {
        form_id: form_id.to_string(),
        hash: hash.map(str::to_string),
        ..FormListEntry::default()
    }
}

#[tokio::test]
async fn record_and_read_back() {
    let store = open_memory().await.unwrap();
    assert!(store.list_forms().await.unwrap().is_empty());

    let id = store.record_form(&record("one-question", HASH_A)).await.unwrap();
    let form = store.get_form(id).await.unwrap().expect("stored");
    assert_eq!(form.form_id, "one-question");
    assert_eq!(form.version.as_deref(), Some("1"));
    assert_eq!(form.hash, HASH_A);
    assert_eq!(form.form_path, PathBuf::from("/forms/one-question.xml"));
    assert!(form.media_dir.is_none());
}

#[tokio::test]
async fn latest_form_prefers_newest_row() {
    let store = open_memory().await.unwrap();
    store.record_form(&record("f", HASH_A)).await.unwrap();
    let newer = store.record_form(&record("f", HASH_B)).await.unwrap();
    let latest = store.latest_form("f").await.unwrap().unwrap();
    assert_eq!(latest.id, newer);
    assert_eq!(latest.hash, HASH_B);
    assert!(store.latest_form("other").await.unwrap().is_none());
}

#[tokio::test]
async fn remove_form_reports_whether_it_existed() {
    let store = open_memory().await.unwrap();
    let id = store.record_form(&record("f", HASH_A)).await.unwrap();
    assert!(store.remove_form(id).await.unwrap());
    assert!(!store.remove_form(id).await.unwrap());
    assert!(store.get_form(id).await.unwrap().is_none());
}

#[tokio::test]
async fn status_against_stored_hash() {
    let store = open_memory().await.unwrap();
    assert_eq!(
        store.form_status(&entry("f", Some(HASH_A))).await.unwrap(),
        FormStatus::New
    );
    store.record_form(&record("f", HASH_A)).await.unwrap();
    assert_eq!(
        store.form_status(&entry("f", Some(HASH_A))).await.unwrap(),
        FormStatus::UpToDate
    );
    assert_eq!(
        store
            .form_status(&entry("f", Some(&HASH_A.to_uppercase().replace("MD5", "md5"))))
            .await
            .unwrap(),
        FormStatus::UpToDate
    );
    assert_eq!(
        store.form_status(&entry("f", Some(HASH_B))).await.unwrap(),
        FormStatus::UpdateAvailable
    );
    assert_eq!(
        store.form_status(&entry("f", None)).await.unwrap(),
        FormStatus::MissingHash
    );
}

#[tokio::test]
async fn open_at_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("forms.db");
    let store = crate::store::FormStore::open_at(&path).await.unwrap();
    store.record_form(&record("f", HASH_A)).await.unwrap();
    assert!(path.exists());
}
