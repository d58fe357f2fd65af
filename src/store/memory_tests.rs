use super::*;

#[tokio::test]
async fn add_user_to_crn_maintains_bidirectional_index() {
    let store = InMemoryStore::new();
    store.add_user_to_crn("12345", "u1").await.unwrap();

    let user = store.get_user("u1").await.unwrap().unwrap();
    let crn = store.get_crn("12345").await.unwrap().unwrap();
    assert!(user.tracked_crns.contains("12345"));
    assert!(crn.tracking_users.contains("u1"));
}

#[tokio::test]
async fn remove_user_from_crn_deletes_record_when_empty() {
    let store = InMemoryStore::new();
    store.add_user_to_crn("12345", "u1").await.unwrap();
    store.remove_user_from_crn("12345", "u1").await.unwrap();

    assert!(store.get_crn("12345").await.unwrap().is_none());
    let user = store.get_user("u1").await.unwrap().unwrap();
    assert!(!user.tracked_crns.contains("12345"));
}

#[tokio::test]
async fn remove_user_from_crn_keeps_record_when_others_remain() {
    let store = InMemoryStore::new();
    store.add_user_to_crn("12345", "u1").await.unwrap();
    store.add_user_to_crn("12345", "u2").await.unwrap();
    store.remove_user_from_crn("12345", "u1").await.unwrap();

    let crn = store.get_crn("12345").await.unwrap().unwrap();
    assert_eq!(crn.tracking_users.len(), 1);
    assert!(crn.tracking_users.contains("u2"));
}

#[tokio::test]
async fn scan_active_crns_excludes_untracked_records() {
    let store = InMemoryStore::new();
    store.add_user_to_crn("12345", "u1").await.unwrap();
    store.remove_user_from_crn("12345", "u1").await.unwrap();
    store.add_user_to_crn("67890", "u2").await.unwrap();

    let active = store.scan_active_crns().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].crn, "67890");
}
