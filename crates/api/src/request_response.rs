// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as ISO 8601 strings and are parsed at this boundary;
//! money travels as decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookstore_domain::{Book, Order, Role, User};

/// API request to register a new customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The account email. Stored lowercased; unique.
    pub email: String,
    /// The plain-text password. Hashed before storage, never echoed.
    pub password: String,
    pub given_name: String,
    pub surname: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub phone: String,
    /// Date of birth (`YYYY-MM-DD`).
    pub birth_date: String,
}

/// API request to establish a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer token identifying the new session.
    pub token: String,
    /// The authenticated user's id.
    pub user_id: i64,
    /// The authenticated user's role.
    pub role: Role,
    /// Session expiration (ISO 8601).
    pub expires_at: String,
}

/// A customer record as exposed by the API. Carries no credential data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
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

impl CustomerResponse {
    /// Builds a response from a domain user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            given_name: user.given_name.clone(),
            surname: user.surname.clone(),
            country: user.address.country.clone(),
            city: user.address.city.clone(),
            street: user.address.street.clone(),
            house_number: user.address.house_number.clone(),
            phone: user.phone.clone(),
            birth_date: user.birth_date.to_string(),
            created_at: user.created_at.clone(),
        }
    }

}

/// API request to update a customer profile.
///
/// Role and credential are not part of the update surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub phone: String,
    /// Date of birth (`YYYY-MM-DD`).
    pub birth_date: String,
}

/// API request to create or replace a catalog book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    /// Ordered list of author names.
    pub authors: Vec<String>,
    /// Unit price as a decimal string (e.g. `"12.99"`).
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Release date (`YYYY-MM-DD`).
    pub release_date: String,
    pub isbn: String,
    pub stock: i64,
}

/// A catalog book as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub release_date: String,
    pub isbn: String,
    pub stock: i64,
}

impl BookResponse {
    /// Builds a response from a domain book.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            authors: book.authors.clone(),
            price: book.price,
            release_date: book.release_date.to_string(),
            isbn: book.isbn.clone(),
            stock: book.stock,
        }
    }
}

/// API request to place an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Referenced books, in order, duplicates permitted.
    pub book_ids: Vec<i64>,
    /// Ignored for non-admin callers: the order is always created for the
    /// caller's own account. Admins may place an order for any customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

/// API request to replace an order's book set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderBooksRequest {
    /// The replacement book set. Must be non-empty.
    pub book_ids: Vec<i64>,
}

/// API request to change an order's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// The requested status value.
    pub status: String,
}

/// An order as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub order_date: String,
    /// Snapshot value as a decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub order_value: Decimal,
    pub book_ids: Vec<i64>,
    pub customer_id: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl OrderResponse {
    /// Builds a response from a domain order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id,
            order_date: order.order_date.clone(),
            order_value: order.order_value,
            book_ids: order.book_ids.clone(),
            customer_id: order.customer_id,
            status: order.status.as_str().to_string(),
            created_at: order.created_at.clone(),
            updated_at: order.updated_at.clone(),
        }
    }
}
