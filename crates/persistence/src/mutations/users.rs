// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.
//!
//! Plain-text credentials enter here and leave as bcrypt hashes; nothing
//! above this layer ever sees or stores a hash it created itself.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::info;

use crate::data_models::UserRecord;
use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::{queries, sqlite};

/// Creates a new user.
///
/// The email is expected in canonical (lowercased) form. The password is
/// hashed with bcrypt before it is stored.
///
/// # Errors
///
/// Returns `DuplicateKey` if the email is already registered, or another
/// error if the insert fails.
#[allow(clippy::too_many_arguments)]
pub fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    role: &str,
    given_name: &str,
    surname: &str,
    country: &str,
    city: &str,
    street: &str,
    house_number: &str,
    phone: &str,
    birth_date: Date,
) -> Result<UserRecord, PersistenceError> {
    info!(email, role, "Creating user");

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::email.eq(email),
            users::password_hash.eq(&password_hash),
            users::role.eq(role),
            users::given_name.eq(given_name),
            users::surname.eq(surname),
            users::country.eq(country),
            users::city.eq(city),
            users::street.eq(street),
            users::house_number.eq(house_number),
            users::phone.eq(phone),
            users::birth_date.eq(birth_date.to_string()),
        ))
        .execute(conn)?;

    let user_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");

    queries::users::get_user_by_id(conn, user_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id} not found after insert")))
}

/// Updates a user's profile fields.
///
/// Role and credential are deliberately not updatable through this path.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist, `DuplicateKey` if the
/// new email collides with another user, or another error if the update
/// fails.
#[allow(clippy::too_many_arguments)]
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    email: &str,
    given_name: &str,
    surname: &str,
    country: &str,
    city: &str,
    street: &str,
    house_number: &str,
    phone: &str,
    birth_date: Date,
) -> Result<UserRecord, PersistenceError> {
    info!(user_id, "Updating user");

    let updated: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::email.eq(email),
            users::given_name.eq(given_name),
            users::surname.eq(surname),
            users::country.eq(country),
            users::city.eq(city),
            users::street.eq(street),
            users::house_number.eq(house_number),
            users::phone.eq(phone),
            users::birth_date.eq(birth_date.to_string()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User {user_id} does not exist"
        )));
    }

    queries::users::get_user_by_id(conn, user_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id} not found after update")))
}

/// Deletes a user.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist, or
/// `ForeignKeyViolation` if orders still reference the user.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!(user_id, "Deleting user");

    let deleted: usize = diesel::delete(users::table)
        .filter(users::user_id.eq(user_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User {user_id} does not exist"
        )));
    }

    Ok(())
}
