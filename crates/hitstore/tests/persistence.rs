//! Saving, reopening and backup behaviour on a real filesystem.

use std::fs;

use chrono::{DateTime, TimeZone, Utc};
use hitstore::criterion::string::equals_string;
use hitstore::{backup_path, Closer, Hit, Requester, Store, StoreConfig, StoreError, Where};
use tempfile::TempDir;

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2009, 4, 13, h, 0, 0).unwrap()
}

fn sample(h: u32, city: &str) -> Hit {
    Hit::new(at(h), "example.org", "/").with_client(Requester::new(
        Some("10.1.10.1".parse().unwrap()),
        "Beforus",
        city,
    ))
}

#[test]
fn open_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(StoreConfig::at(dir.path().join("hits.json"))).unwrap();
    assert!(store.is_empty());
    assert!(!store.is_dirty());
}

#[test]
fn save_then_reopen_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path)).unwrap();
    store.insert(sample(2, "Skaia"));
    store.insert(sample(0, "Alternia"));
    store.save().unwrap();
    assert!(!store.is_dirty());

    // First save has nothing to back up.
    assert!(!backup_path(&path).exists());

    let reopened = Store::open(StoreConfig::at(&path)).unwrap();
    assert_eq!(reopened.select(None).unwrap(), store.select(None).unwrap());
}

#[test]
fn second_save_backs_up_the_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path)).unwrap();
    store.insert(sample(0, "Alternia"));
    store.save().unwrap();
    let first = fs::read(&path).unwrap();

    store.insert(sample(1, "Skaia"));
    store.save().unwrap();

    assert_eq!(fs::read(backup_path(&path)).unwrap(), first);
    assert_ne!(fs::read(&path).unwrap(), first);
}

#[test]
fn failed_backup_leaves_primary_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path)).unwrap();
    store.insert(sample(0, "Alternia"));
    store.save().unwrap();
    let good = fs::read(&path).unwrap();

    // A directory on the backup name makes the copy fail.
    fs::create_dir(backup_path(&path)).unwrap();

    store.insert(sample(1, "Skaia"));
    let err = store.save().unwrap_err();
    assert!(matches!(err, StoreError::Backup { .. }));
    assert_eq!(fs::read(&path).unwrap(), good);
    assert!(store.is_dirty());
}

#[test]
fn every_overwrite_leaves_a_backup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path).save_on_close(false)).unwrap();
    store.insert(sample(0, "Alternia"));
    store.save().unwrap();

    for h in 1..4 {
        let previous = fs::read(&path).unwrap();
        store.insert(sample(h, "Skaia"));
        store.save().unwrap();

        assert_ne!(fs::read(&path).unwrap(), previous);
        assert_eq!(fs::read(backup_path(&path)).unwrap(), previous);
    }
}

#[test]
fn close_saves_pending_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path)).unwrap();
    store.insert(sample(0, "Alternia"));
    store.close().unwrap();

    let reopened = Store::open(StoreConfig::at(&path)).unwrap();
    assert_eq!(reopened.len(), 1);
}

#[test]
fn close_respects_save_on_close() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path).save_on_close(false)).unwrap();
    store.insert(sample(0, "Alternia"));
    store.close().unwrap();

    assert!(!path.exists());
}

#[test]
fn mutations_mark_the_store_dirty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");

    let mut store = Store::open(StoreConfig::at(&path)).unwrap();
    store.insert(sample(0, "Alternia"));
    store.insert(sample(1, "Skaia"));
    store.save().unwrap();

    let skaia = Where::new().client_city(equals_string("Skaia"));
    store.delete(Some(&skaia)).unwrap();
    assert!(store.is_dirty());
    store.close().unwrap();

    let reopened = Store::open(StoreConfig::at(&path)).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.select(None).unwrap()[0].client.city, "Alternia");
}

#[test]
fn unsorted_file_is_sorted_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");
    let hits = vec![sample(3, "c"), sample(1, "a"), sample(2, "b")];
    fs::write(&path, serde_json::to_vec(&hits).unwrap()).unwrap();

    let store = Store::open(StoreConfig::at(&path)).unwrap();
    let cities: Vec<String> = store
        .select(None)
        .unwrap()
        .into_iter()
        .map(|h| h.client.city)
        .collect();
    assert_eq!(cities, ["a", "b", "c"]);
}

#[test]
fn malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hits.json");
    fs::write(&path, b"{not json").unwrap();

    let err = Store::open(StoreConfig::at(&path)).unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}
