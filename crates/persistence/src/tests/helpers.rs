// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::date;

use bookstore_domain::Book;

use crate::{Persistence, UserRecord};

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

pub fn create_test_customer(persistence: &mut Persistence, email: &str) -> UserRecord {
    persistence
        .create_user(
            email,
            "hunter2-hunter2",
            "user",
            "John",
            "Smith",
            "United States",
            "New York",
            "Broadway",
            "123",
            "2125551234",
            date!(1985 - 05 - 15),
        )
        .expect("Failed to create test customer")
}

pub fn create_test_book(persistence: &mut Persistence, title: &str, isbn: &str) -> Book {
    persistence
        .create_book(
            title,
            &[String::from("Test Author")],
            price("12.99"),
            date!(1925 - 04 - 10),
            isbn,
            15,
        )
        .expect("Failed to create test book")
}
