// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email address is malformed.
    InvalidEmail(String),
    /// Phone number is malformed.
    InvalidPhone(String),
    /// A name field (given name, surname) is empty or invalid.
    InvalidName {
        /// The field that was invalid.
        field: &'static str,
        /// A human-readable description of the error.
        message: String,
    },
    /// An address field is empty or invalid.
    InvalidAddress {
        /// The field that was invalid.
        field: &'static str,
        /// A human-readable description of the error.
        message: String,
    },
    /// Book title is empty or invalid.
    InvalidTitle(String),
    /// Book author list is empty or contains an empty entry.
    InvalidAuthors(String),
    /// ISBN is empty or invalid.
    InvalidIsbn(String),
    /// Book price is negative.
    NegativePrice {
        /// The offending price value.
        price: String,
    },
    /// Book stock is negative.
    NegativeStock {
        /// The offending stock value.
        stock: i64,
    },
    /// Role string is not a recognized role.
    InvalidRole(String),
    /// Order status string is not a recognized status.
    InvalidOrderStatus {
        /// The offending status value.
        status: String,
    },
    /// An order status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The field holding the date.
        field: &'static str,
        /// The invalid date string.
        date_string: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidName { field, message } => {
                write!(f, "Invalid {field}: {message}")
            }
            Self::InvalidAddress { field, message } => {
                write!(f, "Invalid {field}: {message}")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidAuthors(msg) => write!(f, "Invalid authors: {msg}"),
            Self::InvalidIsbn(msg) => write!(f, "Invalid ISBN: {msg}"),
            Self::NegativePrice { price } => {
                write!(f, "Price must not be negative, got {price}")
            }
            Self::NegativeStock { stock } => {
                write!(f, "Stock must not be negative, got {stock}")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidOrderStatus { status } => {
                write!(f, "Invalid order status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition order from '{from}' to '{to}': {reason}")
            }
            Self::DateParseError { field, date_string } => {
                write!(f, "Failed to parse {field} date '{date_string}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
