// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the bookstore back-office.
//!
//! This crate owns the request/response contract: DTOs, the error
//! taxonomy, authentication, and the operation handlers that orchestrate
//! authorization, pricing, lifecycle checks, and persistence. The HTTP
//! server stays thin and delegates here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthenticationService;
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    create_book, create_order, delete_book, delete_customer, delete_order, get_book, get_customer,
    get_order, list_books, list_customer_orders, list_customers, list_orders, search_books,
    update_book, update_customer, update_order_books, update_order_status,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    BookRequest, BookResponse, CreateOrderRequest, CustomerResponse, LoginRequest, LoginResponse,
    OrderResponse, RegisterRequest, UpdateCustomerRequest, UpdateOrderBooksRequest,
    UpdateOrderStatusRequest,
};
