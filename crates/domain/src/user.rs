// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User entity and roles.
//!
//! There is a single canonical user entity. Customers are users carrying
//! the `user` role; administrators carry the `admin` role. The credential
//! hash never appears here — it stays inside the persistence layer.

use crate::error::DomainError;
use crate::validation::validate_phone;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Roles determining what actions an authenticated user may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer: may place orders and manage their own profile.
    User,
    /// Administrator: full access to catalog, customers, and orders.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
}

/// A registered user (customer or administrator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's canonical identifier.
    pub id: i64,
    /// Unique email address, stored lowercase.
    pub email: String,
    /// The user's role.
    pub role: Role,
    pub given_name: String,
    pub surname: String,
    pub address: Address,
    pub phone: String,
    pub birth_date: Date,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// Validates a user's field constraints.
///
/// Email normalization/validation happens separately via
/// [`crate::normalize_email`]; this function checks the remaining fields.
/// It does NOT check email uniqueness (that requires store context).
///
/// # Errors
///
/// Returns an error if a name or address field is empty, or the phone
/// number is malformed.
pub fn validate_user_fields(
    given_name: &str,
    surname: &str,
    address: &Address,
    phone: &str,
) -> Result<(), DomainError> {
    // Rule: names must not be empty
    if given_name.trim().is_empty() {
        return Err(DomainError::InvalidName {
            field: "given_name",
            message: String::from("Given name cannot be empty"),
        });
    }
    if surname.trim().is_empty() {
        return Err(DomainError::InvalidName {
            field: "surname",
            message: String::from("Surname cannot be empty"),
        });
    }

    // Rule: every address component must be present
    let components: [(&'static str, &str); 4] = [
        ("country", &address.country),
        ("city", &address.city),
        ("street", &address.street),
        ("house_number", &address.house_number),
    ];
    for (field, value) in components {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidAddress {
                field,
                message: format!("{field} cannot be empty"),
            });
        }
    }

    validate_phone(phone)?;

    Ok(())
}
