// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_customer, test_persistence};

#[test]
fn test_create_and_get_session() {
    let mut persistence = test_persistence();
    let user = create_test_customer(&mut persistence, "john.smith@example.com");

    persistence
        .create_session("token-abc", user.user_id, "2099-01-01T00:00:00Z")
        .expect("create should succeed");

    let session = persistence
        .get_session_by_token("token-abc")
        .expect("query should succeed")
        .expect("session should exist");
    assert_eq!(session.user_id, user.user_id);
    assert_eq!(session.expires_at, "2099-01-01T00:00:00Z");
}

#[test]
fn test_unknown_token_returns_none() {
    let mut persistence = test_persistence();
    assert!(
        persistence
            .get_session_by_token("missing")
            .expect("query should succeed")
            .is_none()
    );
}

#[test]
fn test_delete_session_is_idempotent() {
    let mut persistence = test_persistence();
    let user = create_test_customer(&mut persistence, "john.smith@example.com");
    persistence
        .create_session("token-abc", user.user_id, "2099-01-01T00:00:00Z")
        .expect("create should succeed");

    assert_eq!(
        persistence.delete_session("token-abc").expect("delete should succeed"),
        1
    );
    // Deleting again is a harmless no-op.
    assert_eq!(
        persistence.delete_session("token-abc").expect("delete should succeed"),
        0
    );
}

#[test]
fn test_deleting_user_invalidates_their_sessions() {
    let mut persistence = test_persistence();
    let user = create_test_customer(&mut persistence, "john.smith@example.com");
    persistence
        .create_session("token-abc", user.user_id, "2099-01-01T00:00:00Z")
        .expect("create should succeed");

    persistence.delete_user(user.user_id).expect("delete should succeed");

    assert!(
        persistence
            .get_session_by_token("token-abc")
            .expect("query should succeed")
            .is_none()
    );
}

#[test]
fn test_delete_expired_sessions() {
    let mut persistence = test_persistence();
    let user = create_test_customer(&mut persistence, "john.smith@example.com");
    persistence
        .create_session("stale", user.user_id, "2020-01-01T00:00:00Z")
        .expect("create should succeed");
    persistence
        .create_session("fresh", user.user_id, "2099-01-01T00:00:00Z")
        .expect("create should succeed");

    let deleted = persistence
        .delete_expired_sessions("2026-08-01T00:00:00Z")
        .expect("delete should succeed");
    assert_eq!(deleted, 1);

    assert!(
        persistence
            .get_session_by_token("stale")
            .expect("query should succeed")
            .is_none()
    );
    assert!(
        persistence
            .get_session_by_token("fresh")
            .expect("query should succeed")
            .is_some()
    );
}
