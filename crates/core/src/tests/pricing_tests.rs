// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::tests::helpers::book;
use crate::{CoreError, price_order};

#[test]
fn test_single_book_order() {
    let catalog = vec![book(1, "12.99")];
    let value = price_order(&[1], &catalog).expect("pricing should succeed");
    assert_eq!(value, Decimal::from_str("12.99").unwrap());
}

#[test]
fn test_duplicates_are_priced_per_occurrence() {
    let catalog = vec![book(1, "12.99"), book(2, "9.99")];
    let value = price_order(&[1, 1, 2], &catalog).expect("pricing should succeed");
    assert_eq!(value, Decimal::from_str("35.97").unwrap());
}

#[test]
fn test_sum_is_exact_over_many_entries() {
    let catalog = vec![book(1, "0.10"), book(2, "0.20")];
    let requested: Vec<i64> = std::iter::repeat_n(1, 10).chain(std::iter::repeat_n(2, 10)).collect();
    let value = price_order(&requested, &catalog).expect("pricing should succeed");
    assert_eq!(value, Decimal::from_str("3.00").unwrap());
}

#[test]
fn test_empty_book_list_is_rejected() {
    let catalog = vec![book(1, "12.99")];
    assert_eq!(price_order(&[], &catalog), Err(CoreError::EmptyBookList));
}

#[test]
fn test_unknown_book_fails_the_whole_computation() {
    let catalog = vec![book(1, "12.99")];
    assert_eq!(
        price_order(&[1, 99], &catalog),
        Err(CoreError::UnknownBook { book_id: 99 })
    );
}

#[test]
fn test_no_partial_sum_when_any_reference_dangles() {
    // Even when every other id resolves, one dangling reference fails all.
    let catalog = vec![book(1, "12.99"), book(2, "9.99"), book(3, "4.99")];
    let result = price_order(&[1, 2, 3, 4], &catalog);
    assert_eq!(result, Err(CoreError::UnknownBook { book_id: 4 }));
}

#[test]
fn test_zero_priced_books_sum_to_zero() {
    let catalog = vec![book(1, "0")];
    let value = price_order(&[1, 1], &catalog).expect("pricing should succeed");
    assert_eq!(value, Decimal::ZERO);
}
