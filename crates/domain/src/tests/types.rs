// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{DomainError, Role};

#[test]
fn test_role_string_round_trip() {
    for role in [Role::User, Role::Admin] {
        let parsed = Role::from_str(role.as_str()).expect("role should round-trip");
        assert_eq!(role, parsed);
    }
}

#[test]
fn test_invalid_role_string() {
    let result = Role::from_str("superuser");
    assert_eq!(
        result,
        Err(DomainError::InvalidRole(String::from("superuser")))
    );
}

#[test]
fn test_role_strings_are_lowercase() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.as_str(), "admin");
}
