// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog book queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use bookstore_domain::{Book, parse_date};

use crate::diesel_schema::books;
use crate::error::PersistenceError;

/// Diesel Queryable struct for book rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = books)]
pub(crate) struct BookRow {
    book_id: i64,
    title: String,
    authors: String,
    price: String,
    release_date: String,
    isbn: String,
    stock: i64,
    #[allow(dead_code)]
    created_at: String,
    #[allow(dead_code)]
    updated_at: String,
}

/// Converts a stored row into a domain book.
///
/// Authors are stored as a JSON array, price as a decimal string, and the
/// release date as ISO 8601; a row that fails to parse indicates a
/// corrupted store and surfaces as a serialization error.
pub(crate) fn row_to_book(row: BookRow) -> Result<Book, PersistenceError> {
    let authors: Vec<String> = serde_json::from_str(&row.authors)?;
    let price: Decimal = Decimal::from_str(&row.price)
        .map_err(|e| PersistenceError::SerializationError(format!("Invalid stored price: {e}")))?;
    let release_date = parse_date("release_date", &row.release_date)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(Book {
        id: row.book_id,
        title: row.title,
        authors,
        price,
        release_date,
        isbn: row.isbn,
        stock: row.stock,
    })
}

/// Retrieves a book by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the book is not found.
pub fn get_book(
    conn: &mut SqliteConnection,
    book_id: i64,
) -> Result<Option<Book>, PersistenceError> {
    debug!(book_id, "Looking up book");

    let result: Result<BookRow, diesel::result::Error> = books::table
        .filter(books::book_id.eq(book_id))
        .select(BookRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_book(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the distinct books matching a set of IDs.
///
/// IDs with no matching book are simply absent from the result; resolving
/// which references dangle is the caller's concern.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_books_by_ids(
    conn: &mut SqliteConnection,
    book_ids: &[i64],
) -> Result<Vec<Book>, PersistenceError> {
    let rows: Vec<BookRow> = books::table
        .filter(books::book_id.eq_any(book_ids))
        .select(BookRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_book).collect()
}

/// Lists the whole catalog, ordered by title.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_books(conn: &mut SqliteConnection) -> Result<Vec<Book>, PersistenceError> {
    let rows: Vec<BookRow> = books::table
        .order(books::title.asc())
        .select(BookRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_book).collect()
}

/// Searches the catalog by case-insensitive substring on title or authors.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_books(
    conn: &mut SqliteConnection,
    query: &str,
) -> Result<Vec<Book>, PersistenceError> {
    debug!(query, "Searching catalog");

    let pattern: String = format!("%{query}%");
    let rows: Vec<BookRow> = books::table
        .filter(
            books::title
                .like(&pattern)
                .or(books::authors.like(&pattern)),
        )
        .order(books::title.asc())
        .select(BookRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_book).collect()
}
