use super::*;

#[tokio::test]
async fn round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    {
        let store = JsonFileStore::open(&path).await.unwrap();
        store.add_user_to_crn("12345", "u1").await.unwrap();
    }

    let reopened = JsonFileStore::open(&path).await.unwrap();
    let user = reopened.get_user("u1").await.unwrap().unwrap();
    assert!(user.tracked_crns.contains("12345"));
    let crn = reopened.get_crn("12345").await.unwrap().unwrap();
    assert!(crn.tracking_users.contains("u1"));
}

#[tokio::test]
async fn open_on_missing_path_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");
    let store = JsonFileStore::open(&path).await.unwrap();
    assert!(store.scan_active_crns().await.unwrap().is_empty());
}

#[tokio::test]
async fn no_tmp_file_left_behind_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    let store = JsonFileStore::open(&path).await.unwrap();
    store.add_user_to_crn("12345", "u1").await.unwrap();
    assert!(!path.with_extension("tmp").exists());
    assert!(path.exists());
}
