// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order pricing and book-set validation.
//!
//! Pricing is an explicit step invoked by the API layer before any
//! persistence call — not a save hook. It runs exactly once per order
//! creation and once per book-set update; reads return the stored
//! snapshot.

use crate::error::CoreError;
use bookstore_domain::Book;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Computes the order value for a requested book set.
///
/// `requested` is the ordered list of book ids the order references, with
/// duplicates permitted — a book referenced twice is priced twice.
/// `resolved` is the set of catalog books looked up for those ids.
///
/// All-or-nothing: if any requested id has no matching resolved book, the
/// whole computation fails and no partial sum is ever returned.
///
/// # Errors
///
/// - `CoreError::EmptyBookList` if `requested` is empty
/// - `CoreError::UnknownBook` for the first id that fails to resolve
/// - `CoreError::NegativeOrderValue` if the sum comes out negative
pub fn price_order(requested: &[i64], resolved: &[Book]) -> Result<Decimal, CoreError> {
    if requested.is_empty() {
        return Err(CoreError::EmptyBookList);
    }

    let prices: HashMap<i64, Decimal> = resolved.iter().map(|b| (b.id, b.price)).collect();

    let mut order_value: Decimal = Decimal::ZERO;
    for book_id in requested {
        let price: Decimal = *prices
            .get(book_id)
            .ok_or(CoreError::UnknownBook { book_id: *book_id })?;
        order_value += price;
    }

    // Catalog validation keeps prices non-negative, so the sum must be too.
    if order_value.is_sign_negative() && !order_value.is_zero() {
        return Err(CoreError::NegativeOrderValue {
            value: order_value.to_string(),
        });
    }

    Ok(order_value)
}
