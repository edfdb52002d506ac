use super::*;

fn user() -> User {
    User {
        id: "42".to_string(),
        username: "operator".to_string(),
        avatar: None,
        global_name: Some("Op".to_string()),
    }
}

#[test]
fn session_expires_after_lifetime() {
    let now = OffsetDateTime::now_utc();
    let session = Session::begin_at("tok".to_string(), user(), now);
    assert!(!session.is_expired_at(now + time::Duration::days(6)));
    assert!(session.is_expired_at(now + time::Duration::days(7)));
}

#[test]
fn store_round_trips_and_clears() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path().join("session.json"));
    assert!(store.load().unwrap().is_none());
    assert!(store.require().is_err());

    let session = Session::begin("tok".to_string(), user());
    store.save(&session).unwrap();
    let loaded = store.require().unwrap();
    assert_eq!(loaded.token, "tok");
    assert_eq!(loaded.user.display_name(), "Op");

    loaded.teardown(&store).unwrap();
    assert!(store.load().unwrap().is_none());
    assert!(!store.clear().unwrap());
}

#[test]
fn expired_session_is_not_usable() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path().join("session.json"));
    let started = OffsetDateTime::now_utc() - time::Duration::days(8);
    store
        .save(&Session::begin_at("old".to_string(), user(), started))
        .unwrap();

    let err = store.require().unwrap_err();
    assert!(err.to_string().contains("expired"));
}
