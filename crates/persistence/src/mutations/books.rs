// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog book mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use time::Date;
use tracing::info;

use bookstore_domain::Book;

use crate::diesel_schema::books;
use crate::error::PersistenceError;
use crate::{queries, sqlite};

/// Creates a new book.
///
/// # Errors
///
/// Returns `DuplicateKey` if the ISBN is already in the catalog, or
/// another error if the insert fails.
pub fn create_book(
    conn: &mut SqliteConnection,
    title: &str,
    authors: &[String],
    price: Decimal,
    release_date: Date,
    isbn: &str,
    stock: i64,
) -> Result<Book, PersistenceError> {
    info!(title, isbn, "Creating book");

    let authors_json: String = serde_json::to_string(authors)?;

    diesel::insert_into(books::table)
        .values((
            books::title.eq(title),
            books::authors.eq(&authors_json),
            books::price.eq(price.to_string()),
            books::release_date.eq(release_date.to_string()),
            books::isbn.eq(isbn),
            books::stock.eq(stock),
        ))
        .execute(conn)?;

    let book_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(book_id, "Book created successfully");

    queries::books::get_book(conn, book_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Book {book_id} not found after insert")))
}

/// Updates every mutable field of a book.
///
/// # Errors
///
/// Returns `NotFound` if the book does not exist, `DuplicateKey` if the
/// new ISBN collides with another book, or another error if the update
/// fails.
#[allow(clippy::too_many_arguments)]
pub fn update_book(
    conn: &mut SqliteConnection,
    book_id: i64,
    title: &str,
    authors: &[String],
    price: Decimal,
    release_date: Date,
    isbn: &str,
    stock: i64,
) -> Result<Book, PersistenceError> {
    info!(book_id, "Updating book");

    let authors_json: String = serde_json::to_string(authors)?;

    let updated: usize = diesel::update(books::table)
        .filter(books::book_id.eq(book_id))
        .set((
            books::title.eq(title),
            books::authors.eq(&authors_json),
            books::price.eq(price.to_string()),
            books::release_date.eq(release_date.to_string()),
            books::isbn.eq(isbn),
            books::stock.eq(stock),
            books::updated_at
                .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Book {book_id} does not exist"
        )));
    }

    queries::books::get_book(conn, book_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Book {book_id} not found after update")))
}

/// Deletes a book.
///
/// # Errors
///
/// Returns `NotFound` if the book does not exist, or
/// `ForeignKeyViolation` if existing orders still reference it.
pub fn delete_book(conn: &mut SqliteConnection, book_id: i64) -> Result<(), PersistenceError> {
    info!(book_id, "Deleting book");

    let deleted: usize = diesel::delete(books::table)
        .filter(books::book_id.eq(book_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Book {book_id} does not exist"
        )));
    }

    Ok(())
}
