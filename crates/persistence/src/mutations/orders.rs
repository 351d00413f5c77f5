// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order mutations.
//!
//! Creation and book-set replacement run inside a single transaction so
//! the order row and its `order_books` rows change together — a reader
//! can never observe a new book set with a stale `order_value`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::info;

use bookstore_domain::{Order, OrderStatus};

use crate::diesel_schema::{order_books, orders};
use crate::error::PersistenceError;
use crate::{queries, sqlite};

/// Inserts the join rows for an order's book list, preserving order and
/// duplicates via the position column.
fn insert_book_refs(
    conn: &mut SqliteConnection,
    order_id: i64,
    book_ids: &[i64],
) -> Result<(), PersistenceError> {
    for (index, book_id) in book_ids.iter().enumerate() {
        let position: i32 = i32::try_from(index)
            .map_err(|_| PersistenceError::Other(String::from("Order book list too long")))?;
        diesel::insert_into(order_books::table)
            .values((
                order_books::order_id.eq(order_id),
                order_books::book_id.eq(*book_id),
                order_books::position.eq(position),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Creates a new order in `pending` status.
///
/// `order_value` is the already-computed price snapshot for `book_ids`;
/// computing it is the caller's job, before this call.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if the customer or a book reference does
/// not exist, or another error if the insert fails.
pub fn create_order(
    conn: &mut SqliteConnection,
    customer_id: i64,
    book_ids: &[i64],
    order_value: Decimal,
    order_date: &str,
) -> Result<Order, PersistenceError> {
    info!(customer_id, books = book_ids.len(), "Creating order");

    conn.transaction::<Order, PersistenceError, _>(|conn| {
        diesel::insert_into(orders::table)
            .values((
                orders::order_date.eq(order_date),
                orders::order_value.eq(order_value.to_string()),
                orders::customer_id.eq(customer_id),
                orders::status.eq(OrderStatus::Pending.as_str()),
            ))
            .execute(conn)?;

        let order_id: i64 = sqlite::get_last_insert_rowid(conn)?;
        insert_book_refs(conn, order_id, book_ids)?;

        info!(order_id, "Order created successfully");

        queries::orders::get_order(conn, order_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Order {order_id} not found after insert"))
        })
    })
}

/// Replaces an order's book set together with its recomputed value.
///
/// # Errors
///
/// Returns `NotFound` if the order does not exist, `ForeignKeyViolation`
/// if a book reference does not exist, or another error if the update
/// fails.
pub fn update_order_books(
    conn: &mut SqliteConnection,
    order_id: i64,
    book_ids: &[i64],
    order_value: Decimal,
) -> Result<Order, PersistenceError> {
    info!(order_id, books = book_ids.len(), "Updating order book set");

    conn.transaction::<Order, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(orders::table)
            .filter(orders::order_id.eq(order_id))
            .set((
                orders::order_value.eq(order_value.to_string()),
                orders::updated_at
                    .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Order {order_id} does not exist"
            )));
        }

        diesel::delete(order_books::table)
            .filter(order_books::order_id.eq(order_id))
            .execute(conn)?;
        insert_book_refs(conn, order_id, book_ids)?;

        queries::orders::get_order(conn, order_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Order {order_id} not found after update"))
        })
    })
}

/// Sets an order's status.
///
/// Lifecycle legality is validated by the caller before this call; the
/// store only records the new value.
///
/// # Errors
///
/// Returns `NotFound` if the order does not exist, or another error if
/// the update fails.
pub fn update_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<Order, PersistenceError> {
    info!(order_id, status = status.as_str(), "Updating order status");

    let updated: usize = diesel::update(orders::table)
        .filter(orders::order_id.eq(order_id))
        .set((
            orders::status.eq(status.as_str()),
            orders::updated_at
                .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Order {order_id} does not exist"
        )));
    }

    queries::orders::get_order(conn, order_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Order {order_id} not found after update"))
    })
}

/// Deletes an order.
///
/// The `order_books` join rows go with it via `ON DELETE CASCADE`.
///
/// # Errors
///
/// Returns `NotFound` if the order does not exist.
pub fn delete_order(conn: &mut SqliteConnection, order_id: i64) -> Result<(), PersistenceError> {
    info!(order_id, "Deleting order");

    let deleted: usize = diesel::delete(orders::table)
        .filter(orders::order_id.eq(order_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Order {order_id} does not exist"
        )));
    }

    Ok(())
}
