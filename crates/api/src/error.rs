// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use bookstore_core::CoreError;
use bookstore_domain::DomainError;
use bookstore_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. `Forbidden` and `ResourceNotFound` are deliberately separate
/// outcomes here; whether a denial is surfaced as "not found" to hide a
/// resource's existence is decided per operation (see the order and
/// customer handlers), never by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Login failed. Unknown email and wrong password are identical on
    /// purpose, so callers cannot probe which addresses are registered.
    InvalidCredentials,
    /// Authorization failed - the principal does not have permission.
    Forbidden {
        /// The action that was attempted.
        action: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An order referenced a book that does not exist in the catalog.
    UnknownBook {
        /// The identifier that failed to resolve.
        book_id: i64,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A uniqueness constraint or reference kept the write from applying.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::Forbidden { action } => {
                write!(f, "Forbidden: '{action}' is not permitted")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::UnknownBook { book_id } => {
                write!(f, "Referenced book {book_id} does not exist")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DuplicateKey(message)
            | PersistenceError::ForeignKeyViolation(message) => Self::Conflict { message },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Resource"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidPhone(msg) => ApiError::InvalidInput {
            field: String::from("phone"),
            message: msg,
        },
        DomainError::InvalidName { field, message }
        | DomainError::InvalidAddress { field, message } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidAuthors(msg) => ApiError::InvalidInput {
            field: String::from("authors"),
            message: msg,
        },
        DomainError::InvalidIsbn(msg) => ApiError::InvalidInput {
            field: String::from("isbn"),
            message: msg,
        },
        DomainError::NegativePrice { price } => ApiError::InvalidInput {
            field: String::from("price"),
            message: format!("Price must not be negative, got {price}"),
        },
        DomainError::NegativeStock { stock } => ApiError::InvalidInput {
            field: String::from("stock"),
            message: format!("Stock must not be negative, got {stock}"),
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{role}'"),
        },
        DomainError::InvalidOrderStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!(
                "Unknown status '{status}'. Must be one of: pending, processing, shipped, delivered, cancelled"
            ),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("order_status_lifecycle"),
                message: format!("Cannot transition order from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::DateParseError { field, date_string } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Failed to parse date '{date_string}' (expected YYYY-MM-DD)"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Denied { action } => ApiError::Forbidden { action },
        CoreError::EmptyBookList => ApiError::InvalidInput {
            field: String::from("book_ids"),
            message: String::from("An order must reference at least one book"),
        },
        CoreError::UnknownBook { book_id } => ApiError::UnknownBook { book_id },
        CoreError::NegativeOrderValue { value } => ApiError::Internal {
            message: format!("Computed order value {value} is negative"),
        },
    }
}
