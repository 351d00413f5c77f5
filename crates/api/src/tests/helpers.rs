// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::date;

use bookstore_core::Principal;
use bookstore_domain::Role;
use bookstore_persistence::Persistence;

use crate::request_response::{BookRequest, BookResponse, RegisterRequest};
use crate::{AuthenticationService, create_book};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

pub fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        given_name: String::from("John"),
        surname: String::from("Smith"),
        country: String::from("United States"),
        city: String::from("New York"),
        street: String::from("Broadway"),
        house_number: String::from("123"),
        phone: String::from("2125551234"),
        birth_date: String::from("1985-05-15"),
    }
}

/// Registers a customer and returns their principal.
pub fn create_customer(persistence: &mut Persistence, email: &str) -> Principal {
    let response = AuthenticationService::register(persistence, &register_request(email))
        .expect("Failed to register test customer");
    Principal::Authenticated {
        user_id: response.id,
        role: Role::User,
    }
}

/// Creates an administrator directly in the store (registration can never
/// produce one) and returns their principal.
pub fn create_admin(persistence: &mut Persistence, email: &str) -> Principal {
    let record = persistence
        .create_user(
            email,
            TEST_PASSWORD,
            "admin",
            "Admin",
            "User",
            "United States",
            "New York",
            "Broadway",
            "1",
            "2125550000",
            date!(1980 - 01 - 01),
        )
        .expect("Failed to create test admin");
    Principal::Authenticated {
        user_id: record.user_id,
        role: Role::Admin,
    }
}

pub fn book_request(title: &str, price_str: &str, isbn: &str) -> BookRequest {
    BookRequest {
        title: title.to_string(),
        authors: vec![String::from("Test Author")],
        price: price(price_str),
        release_date: String::from("2001-01-01"),
        isbn: isbn.to_string(),
        stock: 10,
    }
}

/// Adds a book to the catalog through the admin surface.
pub fn add_book(
    persistence: &mut Persistence,
    admin: &Principal,
    title: &str,
    price_str: &str,
    isbn: &str,
) -> BookResponse {
    create_book(persistence, admin, &book_request(title, price_str, isbn))
        .expect("Failed to create test book")
}
