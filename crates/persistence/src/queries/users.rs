// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::UserRecord;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    role: String,
    given_name: String,
    surname: String,
    country: String,
    city: String,
    street: String,
    house_number: String,
    phone: String,
    birth_date: String,
    created_at: String,
}

fn row_to_record(row: UserRow) -> UserRecord {
    UserRecord {
        user_id: row.user_id,
        email: row.email,
        password_hash: row.password_hash,
        role: row.role,
        given_name: row.given_name,
        surname: row.surname,
        country: row.country,
        city: row.city,
        street: row.street,
        house_number: row.house_number,
        phone: row.phone,
        birth_date: row.birth_date,
        created_at: row.created_at,
    }
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserRecord>, PersistenceError> {
    debug!(user_id, "Looking up user by ID");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_record(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by email.
///
/// The email is expected in canonical (lowercased) form; the column holds
/// canonical values only.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user carries the email.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserRecord>, PersistenceError> {
    debug!(email, "Looking up user by email");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::email.eq(email))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_record(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all users carrying a given role, ordered by surname.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users_by_role(
    conn: &mut SqliteConnection,
    role: &str,
) -> Result<Vec<UserRecord>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(role))
        .order(users::surname.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(row_to_record).collect())
}

/// Verifies a password against a stored hash.
///
/// This is a store-adjacent utility that uses bcrypt.
///
/// # Errors
///
/// Returns an error if hash verification itself fails (malformed hash).
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
