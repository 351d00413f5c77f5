// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog book entity.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// A book in the catalog.
///
/// Books are mutated only through explicit catalog operations. Price and
/// existence are read inputs to order pricing; stock is never decremented
/// by order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// The book's canonical identifier.
    pub id: i64,
    /// The book's title.
    pub title: String,
    /// Ordered list of author names.
    pub authors: Vec<String>,
    /// Unit price. Never negative.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Original release date.
    pub release_date: Date,
    /// International Standard Book Number. Unique within the catalog.
    pub isbn: String,
    /// Units on hand. Never negative.
    pub stock: i64,
}

/// Validates a book's field constraints.
///
/// This does NOT check ISBN uniqueness (that requires store context).
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty
/// - The author list is empty or contains an empty name
/// - The price is negative
/// - The stock is negative
/// - The ISBN is empty or contains non-ISBN characters
pub fn validate_book_fields(
    title: &str,
    authors: &[String],
    price: Decimal,
    stock: i64,
    isbn: &str,
) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    // Rule: at least one author, none of them blank
    if authors.is_empty() {
        return Err(DomainError::InvalidAuthors(String::from(
            "At least one author is required",
        )));
    }
    if authors.iter().any(|a| a.trim().is_empty()) {
        return Err(DomainError::InvalidAuthors(String::from(
            "Author names cannot be empty",
        )));
    }

    // Rule: price and stock are non-negative
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::NegativePrice {
            price: price.to_string(),
        });
    }
    if stock < 0 {
        return Err(DomainError::NegativeStock { stock });
    }

    // Rule: ISBN is digits with optional hyphens or a trailing X check digit
    let trimmed: &str = isbn.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidIsbn(String::from(
            "ISBN cannot be empty",
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == 'X')
    {
        return Err(DomainError::InvalidIsbn(String::from(
            "ISBN may only contain digits, hyphens, and 'X'",
        )));
    }

    Ok(())
}
