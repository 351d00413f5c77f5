// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use bookstore_domain::{Address, Role, User, parse_date};

use crate::error::PersistenceError;

/// A stored user row, including the credential hash.
///
/// The hash never leaves the api boundary; responses are built from the
/// domain [`User`] via [`UserRecord::to_user`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub given_name: String,
    pub surname: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub phone: String,
    pub birth_date: String,
    pub created_at: String,
}

impl UserRecord {
    /// Converts the stored row into the domain user, dropping the
    /// credential hash.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the stored role or birth date
    /// fails to parse — that indicates a corrupted store.
    pub fn to_user(&self) -> Result<User, PersistenceError> {
        let role: Role = self.role.parse().map_err(|_| {
            PersistenceError::SerializationError(format!(
                "Stored role '{}' is not a recognized role",
                self.role
            ))
        })?;
        let birth_date = parse_date("birth_date", &self.birth_date)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(User {
            id: self.user_id,
            email: self.email.clone(),
            role,
            given_name: self.given_name.clone(),
            surname: self.surname.clone(),
            address: Address {
                country: self.country.clone(),
                city: self.city.clone(),
                street: self.street.clone(),
                house_number: self.house_number.clone(),
            },
            phone: self.phone.clone(),
            birth_date,
            created_at: self.created_at.clone(),
        })
    }
}

/// A stored session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
