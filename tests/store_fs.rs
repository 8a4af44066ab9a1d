// tests/store_fs.rs
use chrono::Utc;
use tenderwatch::{content_digest, FsStore, Snapshot, SnapshotStore};

#[tokio::test]
async fn persist_writes_matching_content_and_digest() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FsStore::new(tmp.path().join("state"));

    let body = "<html>v1</html>";
    let snap = Snapshot {
        source: "Dept A".into(),
        digest: content_digest(body),
        body: body.into(),
        captured_at: Utc::now(),
    };
    store.persist(&snap).await.unwrap();

    let stored = store.get_digest("Dept A").await.unwrap().unwrap();
    assert_eq!(stored, content_digest(body));
    let on_disk = std::fs::read_to_string(tmp.path().join("state/Dept A.html")).unwrap();
    assert_eq!(content_digest(&on_disk), stored);
}

#[tokio::test]
async fn sources_do_not_interfere() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FsStore::new(tmp.path());

    store.put_digest("Dept A", "aaa").await.unwrap();
    store.put_digest("Dept B", "bbb").await.unwrap();
    store.put_digest("Dept A", "aa2").await.unwrap();

    assert_eq!(store.get_digest("Dept A").await.unwrap().as_deref(), Some("aa2"));
    assert_eq!(store.get_digest("Dept B").await.unwrap().as_deref(), Some("bbb"));
    assert_eq!(store.get_digest("Dept C").await.unwrap(), None);
}

#[tokio::test]
async fn slashes_in_names_stay_on_one_directory_level() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FsStore::new(tmp.path());

    store.put_digest("Roads/Bridges", "abc").await.unwrap();
    assert!(tmp.path().join("Roads-Bridges.hash").exists());
    assert_eq!(
        store.get_digest("Roads/Bridges").await.unwrap().as_deref(),
        Some("abc")
    );
}

#[tokio::test]
async fn stored_empty_digest_is_distinct_from_absent() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FsStore::new(tmp.path());

    assert_eq!(store.get_digest("Dept A").await.unwrap(), None);
    store.put_digest("Dept A", "").await.unwrap();
    assert_eq!(store.get_digest("Dept A").await.unwrap().as_deref(), Some(""));
}
