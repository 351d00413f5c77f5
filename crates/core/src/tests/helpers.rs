// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bookstore_domain::{Book, Role};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::date;

use crate::Principal;

pub fn book(id: i64, price: &str) -> Book {
    Book {
        id,
        title: format!("Book {id}"),
        authors: vec![String::from("Test Author")],
        price: Decimal::from_str(price).unwrap(),
        release_date: date!(2001 - 01 - 01),
        isbn: format!("978000000{id:04}"),
        stock: 10,
    }
}

pub fn admin(user_id: i64) -> Principal {
    Principal::Authenticated {
        user_id,
        role: Role::Admin,
    }
}

pub fn customer(user_id: i64) -> Principal {
    Principal::Authenticated {
        user_id,
        role: Role::User,
    }
}
