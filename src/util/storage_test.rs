use super::*;
use crate::net::types::{Role, UserStatus};

// =============================================================
// Helpers
// =============================================================

fn make_storage() -> (Arc<MemoryStorage>, SessionStorage) {
    let mem = Arc::new(MemoryStorage::new());
    let storage = SessionStorage::new(mem.clone());
    (mem, storage)
}

fn make_profile() -> UserProfile {
    UserProfile {
        id: "u-1".to_owned(),
        username: "quietfox".to_owned(),
        role: Role::User,
        status: UserStatus::Active,
        thread_count: 1,
        reply_count: 4,
        created_at: Some("2026-01-02T03:04:05Z".to_owned()),
    }
}

// =============================================================
// Tokens
// =============================================================

#[test]
fn access_token_set_and_get() {
    let (mem, storage) = make_storage();
    storage.set_access_token(Some("abc"));
    assert_eq!(storage.access_token().as_deref(), Some("abc"));
    assert_eq!(mem.get(ACCESS_TOKEN_KEY).as_deref(), Some("abc"));
}

#[test]
fn access_token_none_removes_key() {
    let (mem, storage) = make_storage();
    storage.set_access_token(Some("abc"));
    storage.set_access_token(None);
    assert_eq!(storage.access_token(), None);
    assert_eq!(mem.get(ACCESS_TOKEN_KEY), None);
}

#[test]
fn empty_token_is_never_stored() {
    let (mem, storage) = make_storage();
    storage.set_refresh_token(Some(""));
    assert!(mem.is_empty());
}

#[test]
fn refresh_token_uses_separate_key() {
    let (mem, storage) = make_storage();
    storage.set_access_token(Some("a"));
    storage.set_refresh_token(Some("r"));
    assert_eq!(mem.get(REFRESH_TOKEN_KEY).as_deref(), Some("r"));
    assert_eq!(storage.access_token().as_deref(), Some("a"));
}

// =============================================================
// User
// =============================================================

#[test]
fn user_round_trips_through_json() {
    let (_mem, storage) = make_storage();
    storage.set_user(Some(&make_profile()));
    assert_eq!(storage.user(), Some(make_profile()));
}

#[test]
fn set_user_none_removes_key() {
    let (mem, storage) = make_storage();
    storage.set_user(Some(&make_profile()));
    storage.set_user(None);
    assert_eq!(storage.user(), None);
    assert_eq!(mem.get(USER_KEY), None);
}

#[test]
fn malformed_user_reads_as_none() {
    let (mem, storage) = make_storage();
    mem.set(USER_KEY, "{not json");
    assert_eq!(storage.user(), None);
}

#[test]
fn user_with_unknown_role_reads_as_none() {
    let (mem, storage) = make_storage();
    mem.set(USER_KEY, r#"{"id":"u","username":"x","role":"root","status":"active"}"#);
    assert_eq!(storage.user(), None);
}

// =============================================================
// clear / LocalStorage
// =============================================================

#[test]
fn clear_removes_all_slots() {
    let (mem, storage) = make_storage();
    storage.set_access_token(Some("a"));
    storage.set_refresh_token(Some("r"));
    storage.set_user(Some(&make_profile()));
    mem.set("unrelated", "kept");

    storage.clear();

    assert_eq!(storage.access_token(), None);
    assert_eq!(storage.refresh_token(), None);
    assert_eq!(storage.user(), None);
    assert_eq!(mem.len(), 1);
}

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_is_empty_outside_browser() {
    let storage = SessionStorage::new(Arc::new(LocalStorage));
    storage.set_access_token(Some("a"));
    assert_eq!(storage.access_token(), None);
}
