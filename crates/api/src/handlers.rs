// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation handlers for catalog, customer, and order resources.
//!
//! Every handler follows the same sequence: authorize the action for the
//! resolved principal, validate input, run any derivation (pricing,
//! lifecycle checks), then persist. Handlers own the whole sequence for
//! one `&mut Persistence` borrow, so a mutation's reads and writes cannot
//! interleave with another request's.
//!
//! Denials on ownership-gated resources (another customer's order or
//! profile) are converted to `ResourceNotFound` here, before they reach
//! the transport — the response must not reveal whether the resource
//! exists. Action-level denials with nothing to leak stay `Forbidden`.

use tracing::info;

use bookstore_core::{Action, Principal, authorize, price_order};
use bookstore_domain::{
    Address, Book, Order, OrderStatus, normalize_email, parse_date, validate_book_fields,
    validate_user_fields,
};
use bookstore_persistence::{Persistence, UserRecord};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    BookRequest, BookResponse, CreateOrderRequest, CustomerResponse, OrderResponse,
    UpdateCustomerRequest, UpdateOrderBooksRequest, UpdateOrderStatusRequest,
};

fn book_not_found(book_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Book"),
        message: format!("Book {book_id} does not exist"),
    }
}

fn customer_not_found(customer_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Customer"),
        message: format!("Customer {customer_id} does not exist"),
    }
}

fn order_not_found(order_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Order"),
        message: format!("Order {order_id} does not exist"),
    }
}

pub(crate) fn customer_response(record: &UserRecord) -> Result<CustomerResponse, ApiError> {
    let user = record.to_user()?;
    Ok(CustomerResponse::from_user(&user))
}

fn now_iso() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

// ============================================================================
// Catalog
// ============================================================================

/// Lists the whole catalog.
///
/// # Errors
///
/// Returns an error if the principal is denied or the store fails.
pub fn list_books(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<BookResponse>, ApiError> {
    authorize(principal, &Action::ReadCatalog).map_err(translate_core_error)?;

    let books: Vec<Book> = persistence.list_books()?;
    Ok(books.iter().map(BookResponse::from_book).collect())
}

/// Retrieves a single book.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the book does not exist.
pub fn get_book(
    persistence: &mut Persistence,
    principal: &Principal,
    book_id: i64,
) -> Result<BookResponse, ApiError> {
    authorize(principal, &Action::ReadCatalog).map_err(translate_core_error)?;

    let book: Book = persistence
        .get_book(book_id)?
        .ok_or_else(|| book_not_found(book_id))?;
    Ok(BookResponse::from_book(&book))
}

/// Searches the catalog by case-insensitive substring on title or authors.
///
/// # Errors
///
/// Returns an error if the principal is denied or the store fails.
pub fn search_books(
    persistence: &mut Persistence,
    principal: &Principal,
    query: &str,
) -> Result<Vec<BookResponse>, ApiError> {
    authorize(principal, &Action::ReadCatalog).map_err(translate_core_error)?;

    let books: Vec<Book> = persistence.search_books(query)?;
    Ok(books.iter().map(BookResponse::from_book).collect())
}

/// Creates a new catalog book. Admin only.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, a validation error for malformed
/// fields, or `Conflict` for a duplicate ISBN.
pub fn create_book(
    persistence: &mut Persistence,
    principal: &Principal,
    req: &BookRequest,
) -> Result<BookResponse, ApiError> {
    authorize(principal, &Action::WriteCatalog).map_err(translate_core_error)?;

    validate_book_fields(&req.title, &req.authors, req.price, req.stock, &req.isbn)
        .map_err(translate_domain_error)?;
    let release_date =
        parse_date("release_date", &req.release_date).map_err(translate_domain_error)?;

    let book: Book = persistence.create_book(
        &req.title,
        &req.authors,
        req.price,
        release_date,
        req.isbn.trim(),
        req.stock,
    )?;

    info!(book_id = book.id, "Book created");

    Ok(BookResponse::from_book(&book))
}

/// Replaces a catalog book's fields. Admin only.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `ResourceNotFound` for an unknown
/// book, a validation error for malformed fields, or `Conflict` for a
/// duplicate ISBN.
pub fn update_book(
    persistence: &mut Persistence,
    principal: &Principal,
    book_id: i64,
    req: &BookRequest,
) -> Result<BookResponse, ApiError> {
    authorize(principal, &Action::WriteCatalog).map_err(translate_core_error)?;

    validate_book_fields(&req.title, &req.authors, req.price, req.stock, &req.isbn)
        .map_err(translate_domain_error)?;
    let release_date =
        parse_date("release_date", &req.release_date).map_err(translate_domain_error)?;

    let book: Book = persistence.update_book(
        book_id,
        &req.title,
        &req.authors,
        req.price,
        release_date,
        req.isbn.trim(),
        req.stock,
    )?;

    info!(book_id, "Book updated");

    Ok(BookResponse::from_book(&book))
}

/// Deletes a catalog book. Admin only.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `ResourceNotFound` for an unknown
/// book, or `Conflict` if live orders still reference it.
pub fn delete_book(
    persistence: &mut Persistence,
    principal: &Principal,
    book_id: i64,
) -> Result<(), ApiError> {
    authorize(principal, &Action::WriteCatalog).map_err(translate_core_error)?;

    persistence.delete_book(book_id)?;

    info!(book_id, "Book deleted");

    Ok(())
}

// ============================================================================
// Customers
// ============================================================================

/// Lists every customer record. Admin only.
///
/// Customers are users carrying the `user` role; administrators are not
/// customer records and are not listed.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins.
pub fn list_customers(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<CustomerResponse>, ApiError> {
    authorize(principal, &Action::ListCustomers).map_err(translate_core_error)?;

    let records: Vec<UserRecord> = persistence.list_users_by_role("user")?;
    records.iter().map(customer_response).collect()
}

/// Retrieves a customer record. Admin or the customer themself.
///
/// A denied principal receives the same `ResourceNotFound` as for a
/// customer that does not exist.
///
/// # Errors
///
/// Returns `ResourceNotFound` for denied or missing customers.
pub fn get_customer(
    persistence: &mut Persistence,
    principal: &Principal,
    customer_id: i64,
) -> Result<CustomerResponse, ApiError> {
    if authorize(principal, &Action::ReadCustomer {
        subject: customer_id,
    })
    .is_err()
    {
        return Err(customer_not_found(customer_id));
    }

    let record: UserRecord = persistence
        .get_user_by_id(customer_id)?
        .ok_or_else(|| customer_not_found(customer_id))?;
    customer_response(&record)
}

/// Updates a customer profile. Admin or the customer themself.
///
/// Role and credential are not updatable through this path.
///
/// # Errors
///
/// Returns `ResourceNotFound` for denied or missing customers, a
/// validation error for malformed fields, or `Conflict` for a duplicate
/// email.
pub fn update_customer(
    persistence: &mut Persistence,
    principal: &Principal,
    customer_id: i64,
    req: &UpdateCustomerRequest,
) -> Result<CustomerResponse, ApiError> {
    if authorize(principal, &Action::UpdateCustomer {
        subject: customer_id,
    })
    .is_err()
    {
        return Err(customer_not_found(customer_id));
    }

    let email: String = normalize_email(&req.email).map_err(translate_domain_error)?;
    let address: Address = Address {
        country: req.country.clone(),
        city: req.city.clone(),
        street: req.street.clone(),
        house_number: req.house_number.clone(),
    };
    validate_user_fields(&req.given_name, &req.surname, &address, &req.phone)
        .map_err(translate_domain_error)?;
    let birth_date = parse_date("birth_date", &req.birth_date).map_err(translate_domain_error)?;

    let record: UserRecord = persistence.update_user(
        customer_id,
        &email,
        &req.given_name,
        &req.surname,
        &req.country,
        &req.city,
        &req.street,
        &req.house_number,
        &req.phone,
        birth_date,
    )?;

    info!(customer_id, "Customer profile updated");

    customer_response(&record)
}

/// Deletes a customer record. Admin only.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `ResourceNotFound` for an unknown
/// customer, or `Conflict` if orders still reference the customer.
pub fn delete_customer(
    persistence: &mut Persistence,
    principal: &Principal,
    customer_id: i64,
) -> Result<(), ApiError> {
    authorize(principal, &Action::DeleteCustomer).map_err(translate_core_error)?;

    persistence.delete_user(customer_id)?;

    info!(customer_id, "Customer deleted");

    Ok(())
}

/// Lists a customer's orders. Admin or the matching customer only.
///
/// A denied principal receives the same `ResourceNotFound` as for a
/// customer that does not exist.
///
/// # Errors
///
/// Returns `ResourceNotFound` for denied or missing customers.
pub fn list_customer_orders(
    persistence: &mut Persistence,
    principal: &Principal,
    customer_id: i64,
) -> Result<Vec<OrderResponse>, ApiError> {
    if authorize(principal, &Action::ListCustomerOrders {
        customer: customer_id,
    })
    .is_err()
    {
        return Err(customer_not_found(customer_id));
    }

    // The customer itself must resolve before its order list does.
    persistence
        .get_user_by_id(customer_id)?
        .ok_or_else(|| customer_not_found(customer_id))?;

    let orders: Vec<Order> = persistence.list_orders_by_customer(customer_id)?;
    Ok(orders.iter().map(OrderResponse::from_order).collect())
}

// ============================================================================
// Orders
// ============================================================================

/// Places a new order for the caller.
///
/// For non-admin callers the order's customer is ALWAYS the caller; a
/// caller-supplied `customer_id` is overridden, never trusted. Admins may
/// place an order on any existing customer's behalf.
///
/// The book set is validated and priced before anything is written: a
/// single dangling reference fails the whole request and no order is
/// persisted.
///
/// # Errors
///
/// Returns `Forbidden` for anonymous callers, `UnknownBook` for a
/// dangling book reference, a validation error for an empty book set, or
/// `ResourceNotFound` for an admin-supplied unknown customer.
pub fn create_order(
    persistence: &mut Persistence,
    principal: &Principal,
    req: &CreateOrderRequest,
) -> Result<OrderResponse, ApiError> {
    authorize(principal, &Action::CreateOrder).map_err(translate_core_error)?;

    let caller_id: i64 = principal.user_id().ok_or_else(|| ApiError::Forbidden {
        action: Action::CreateOrder.name().to_string(),
    })?;

    let customer_id: i64 = if principal.is_admin() {
        req.customer_id.unwrap_or(caller_id)
    } else {
        caller_id
    };
    if customer_id != caller_id {
        persistence
            .get_user_by_id(customer_id)?
            .ok_or_else(|| customer_not_found(customer_id))?;
    }

    let resolved: Vec<Book> = persistence.get_books_by_ids(&req.book_ids)?;
    let order_value: Decimal =
        price_order(&req.book_ids, &resolved).map_err(translate_core_error)?;

    let order_date: String = now_iso()?;
    let order: Order =
        persistence.create_order(customer_id, &req.book_ids, order_value, &order_date)?;

    info!(
        order_id = order.id,
        customer_id,
        order_value = %order.order_value,
        "Order created"
    );

    Ok(OrderResponse::from_order(&order))
}

/// Retrieves a single order. Admin or the order's owner.
///
/// A denied principal receives the same `ResourceNotFound` as for an
/// order that does not exist.
///
/// # Errors
///
/// Returns `ResourceNotFound` for denied or missing orders.
pub fn get_order(
    persistence: &mut Persistence,
    principal: &Principal,
    order_id: i64,
) -> Result<OrderResponse, ApiError> {
    let order: Order = persistence
        .get_order(order_id)?
        .ok_or_else(|| order_not_found(order_id))?;

    if authorize(principal, &Action::ReadOrder {
        owner: order.customer_id,
    })
    .is_err()
    {
        return Err(order_not_found(order_id));
    }

    Ok(OrderResponse::from_order(&order))
}

/// Lists every order. Admin only.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins.
pub fn list_orders(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<OrderResponse>, ApiError> {
    authorize(principal, &Action::ListOrders).map_err(translate_core_error)?;

    let orders: Vec<Order> = persistence.list_orders()?;
    Ok(orders.iter().map(OrderResponse::from_order).collect())
}

/// Replaces an order's book set, repricing it. Admin only.
///
/// The new set is validated and priced before the write; the snapshot
/// value and the book list change in one transaction, so a reader can
/// never observe one without the other.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `ResourceNotFound` for an unknown
/// order, a validation error for an empty book set, or `UnknownBook` for
/// a dangling reference.
pub fn update_order_books(
    persistence: &mut Persistence,
    principal: &Principal,
    order_id: i64,
    req: &UpdateOrderBooksRequest,
) -> Result<OrderResponse, ApiError> {
    authorize(principal, &Action::UpdateOrderBooks).map_err(translate_core_error)?;

    persistence
        .get_order(order_id)?
        .ok_or_else(|| order_not_found(order_id))?;

    let resolved: Vec<Book> = persistence.get_books_by_ids(&req.book_ids)?;
    let order_value: Decimal =
        price_order(&req.book_ids, &resolved).map_err(translate_core_error)?;

    let order: Order = persistence.update_order_books(order_id, &req.book_ids, order_value)?;

    info!(order_id, order_value = %order.order_value, "Order book set updated");

    Ok(OrderResponse::from_order(&order))
}

/// Changes an order's lifecycle status. Admin only.
///
/// The requested value must be one of the five defined statuses and the
/// transition must be legal (single-step forward progression, or
/// cancellation from a non-terminal state). A failed validation leaves
/// the stored status unchanged.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `ResourceNotFound` for an unknown
/// order, a validation error for an unknown status value, or
/// `DomainRuleViolation` for an illegal transition.
pub fn update_order_status(
    persistence: &mut Persistence,
    principal: &Principal,
    order_id: i64,
    req: &UpdateOrderStatusRequest,
) -> Result<OrderResponse, ApiError> {
    authorize(principal, &Action::UpdateOrderStatus).map_err(translate_core_error)?;

    let new_status: OrderStatus = req.status.parse().map_err(translate_domain_error)?;

    let order: Order = persistence
        .get_order(order_id)?
        .ok_or_else(|| order_not_found(order_id))?;

    order
        .status
        .validate_transition(new_status)
        .map_err(translate_domain_error)?;

    let updated: Order = persistence.update_order_status(order_id, new_status)?;

    info!(
        order_id,
        from = order.status.as_str(),
        to = new_status.as_str(),
        "Order status updated"
    );

    Ok(OrderResponse::from_order(&updated))
}

/// Deletes an order. Admin only.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins or `ResourceNotFound` for an
/// unknown order.
pub fn delete_order(
    persistence: &mut Persistence,
    principal: &Principal,
    order_id: i64,
) -> Result<(), ApiError> {
    authorize(principal, &Action::DeleteOrder).map_err(translate_core_error)?;

    persistence.delete_order(order_id)?;

    info!(order_id, "Order deleted");

    Ok(())
}
