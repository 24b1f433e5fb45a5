use artscout_store::{KeyValueStore, SqliteStore};
use tempfile::TempDir;

#[test]
fn test_value_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("favorites.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.set("art_explorer_favorites", r#"[{"id":1}]"#).unwrap();
    }

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("art_explorer_favorites").unwrap().as_deref(),
        Some(r#"[{"id":1}]"#)
    );
}

#[test]
fn test_last_writer_wins_across_handles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.db");

    let first = SqliteStore::open(&path).unwrap();
    let second = SqliteStore::open(&path).unwrap();

    first.set("slot", "from first").unwrap();
    second.set("slot", "from second").unwrap();

    assert_eq!(first.get("slot").unwrap().as_deref(), Some("from second"));
}

#[test]
fn test_keys_are_independent() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path().join("kv.db")).unwrap();

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.set("a", "3").unwrap();

    assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
}
