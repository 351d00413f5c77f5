// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order queries.
//!
//! Orders are assembled from two tables: the order row itself and the
//! `order_books` join rows, which preserve reference order and duplicate
//! entries via their `position` column.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use bookstore_domain::{Order, OrderStatus};

use crate::diesel_schema::{order_books, orders};
use crate::error::PersistenceError;

/// Diesel Queryable struct for order rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
pub(crate) struct OrderRow {
    order_id: i64,
    order_date: String,
    order_value: String,
    customer_id: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

/// Loads the ordered book id list for an order.
pub(crate) fn book_ids_for_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(order_books::table
        .filter(order_books::order_id.eq(order_id))
        .order(order_books::position.asc())
        .select(order_books::book_id)
        .load(conn)?)
}

/// Converts a stored row plus its book references into a domain order.
pub(crate) fn row_to_order(
    conn: &mut SqliteConnection,
    row: OrderRow,
) -> Result<Order, PersistenceError> {
    let order_value: Decimal = Decimal::from_str(&row.order_value).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid stored order value: {e}"))
    })?;
    let status: OrderStatus = row
        .status
        .parse()
        .map_err(|e: bookstore_domain::DomainError| {
            PersistenceError::SerializationError(e.to_string())
        })?;
    let book_ids: Vec<i64> = book_ids_for_order(conn, row.order_id)?;

    Ok(Order {
        id: row.order_id,
        order_date: row.order_date,
        order_value,
        book_ids,
        customer_id: row.customer_id,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Retrieves an order by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the order is not found.
pub fn get_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Option<Order>, PersistenceError> {
    debug!(order_id, "Looking up order");

    let result: Result<OrderRow, diesel::result::Error> = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(OrderRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_order(conn, row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every order, most recent first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .order(orders::order_date.desc())
        .select(OrderRow::as_select())
        .load(conn)?;

    rows.into_iter().map(|row| row_to_order(conn, row)).collect()
}

/// Lists the orders belonging to a customer, most recent first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_orders_by_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::customer_id.eq(customer_id))
        .order(orders::order_date.desc())
        .select(OrderRow::as_select())
        .load(conn)?;

    rows.into_iter().map(|row| row_to_order(conn, row)).collect()
}
