// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the bookstore back-office.
//!
//! This crate provides database persistence for the catalog, users,
//! orders, and sessions. It is built on Diesel over SQLite.
//!
//! `SQLite` is the only backend:
//! - in-memory databases back unit and integration tests,
//! - file databases (WAL mode) back real deployments.
//!
//! Uniqueness constraints on indexed fields (`users.email`,
//! `books.isbn`, `sessions.session_token`) are enforced by the schema and
//! surface as [`PersistenceError::DuplicateKey`]. Foreign keys are
//! enforced, so deleting a book or user that live orders still reference
//! surfaces as [`PersistenceError::ForeignKeyViolation`].

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

use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

use bookstore_domain::{Book, Order, OrderStatus};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{SessionRecord, UserRecord};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the bookstore store.
///
/// One adapter owns one connection; callers serialize access (the server
/// holds it behind a mutex), which also makes a read-compute-write
/// sequence against a single order atomic with respect to other requests.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Creates a new book.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` on an ISBN collision, or another error if
    /// the insert fails.
    pub fn create_book(
        &mut self,
        title: &str,
        authors: &[String],
        price: Decimal,
        release_date: Date,
        isbn: &str,
        stock: i64,
    ) -> Result<Book, PersistenceError> {
        mutations::books::create_book(
            &mut self.conn,
            title,
            authors,
            price,
            release_date,
            isbn,
            stock,
        )
    }

    /// Retrieves a book by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Returns `Ok(None)`
    /// if the book is not found.
    pub fn get_book(&mut self, book_id: i64) -> Result<Option<Book>, PersistenceError> {
        queries::books::get_book(&mut self.conn, book_id)
    }

    /// Retrieves the distinct books matching a set of IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_books_by_ids(&mut self, book_ids: &[i64]) -> Result<Vec<Book>, PersistenceError> {
        queries::books::get_books_by_ids(&mut self.conn, book_ids)
    }

    /// Lists the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_books(&mut self) -> Result<Vec<Book>, PersistenceError> {
        queries::books::list_books(&mut self.conn)
    }

    /// Searches the catalog by substring on title or authors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_books(&mut self, query: &str) -> Result<Vec<Book>, PersistenceError> {
        queries::books::search_books(&mut self.conn, query)
    }

    /// Updates every mutable field of a book.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the book does not exist, or `DuplicateKey`
    /// on an ISBN collision.
    #[allow(clippy::too_many_arguments)]
    pub fn update_book(
        &mut self,
        book_id: i64,
        title: &str,
        authors: &[String],
        price: Decimal,
        release_date: Date,
        isbn: &str,
        stock: i64,
    ) -> Result<Book, PersistenceError> {
        mutations::books::update_book(
            &mut self.conn,
            book_id,
            title,
            authors,
            price,
            release_date,
            isbn,
            stock,
        )
    }

    /// Deletes a book.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the book does not exist, or
    /// `ForeignKeyViolation` if orders still reference it.
    pub fn delete_book(&mut self, book_id: i64) -> Result<(), PersistenceError> {
        mutations::books::delete_book(&mut self.conn, book_id)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a new user with a bcrypt-hashed credential.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the email is taken, or another error if
    /// the insert fails.
    #[allow(clippy::too_many_arguments)]
    pub fn create_user(
        &mut self,
        email: &str,
        password: &str,
        role: &str,
        given_name: &str,
        surname: &str,
        country: &str,
        city: &str,
        street: &str,
        house_number: &str,
        phone: &str,
        birth_date: Date,
    ) -> Result<UserRecord, PersistenceError> {
        mutations::users::create_user(
            &mut self.conn,
            email,
            password,
            role,
            given_name,
            surname,
            country,
            city,
            street,
            house_number,
            phone,
            birth_date,
        )
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Returns `Ok(None)`
    /// if the user is not found.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by canonical (lowercased) email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Returns `Ok(None)`
    /// if no user carries the email.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Lists all users carrying a given role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users_by_role(&mut self, role: &str) -> Result<Vec<UserRecord>, PersistenceError> {
        queries::users::list_users_by_role(&mut self.conn, role)
    }

    /// Updates a user's profile fields (role and credential excluded).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist, or `DuplicateKey`
    /// on an email collision.
    #[allow(clippy::too_many_arguments)]
    pub fn update_user(
        &mut self,
        user_id: i64,
        email: &str,
        given_name: &str,
        surname: &str,
        country: &str,
        city: &str,
        street: &str,
        house_number: &str,
        phone: &str,
        birth_date: Date,
    ) -> Result<UserRecord, PersistenceError> {
        mutations::users::update_user(
            &mut self.conn,
            user_id,
            email,
            given_name,
            surname,
            country,
            city,
            street,
            house_number,
            phone,
            birth_date,
        )
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist, or
    /// `ForeignKeyViolation` if orders still reference the user.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if hash verification itself fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Creates a new order in `pending` status with a pre-computed value
    /// snapshot. The order row and its book references are written in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` on a dangling customer or book
    /// reference, or another error if the insert fails.
    pub fn create_order(
        &mut self,
        customer_id: i64,
        book_ids: &[i64],
        order_value: Decimal,
        order_date: &str,
    ) -> Result<Order, PersistenceError> {
        mutations::orders::create_order(
            &mut self.conn,
            customer_id,
            book_ids,
            order_value,
            order_date,
        )
    }

    /// Retrieves an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Returns `Ok(None)`
    /// if the order is not found.
    pub fn get_order(&mut self, order_id: i64) -> Result<Option<Order>, PersistenceError> {
        queries::orders::get_order(&mut self.conn, order_id)
    }

    /// Lists every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_orders(&mut self) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders(&mut self.conn)
    }

    /// Lists the orders belonging to a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_orders_by_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders_by_customer(&mut self.conn, customer_id)
    }

    /// Replaces an order's book set together with its recomputed value,
    /// in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist, or
    /// `ForeignKeyViolation` on a dangling book reference.
    pub fn update_order_books(
        &mut self,
        order_id: i64,
        book_ids: &[i64],
        order_value: Decimal,
    ) -> Result<Order, PersistenceError> {
        mutations::orders::update_order_books(&mut self.conn, order_id, book_ids, order_value)
    }

    /// Sets an order's status. Lifecycle legality is the caller's check.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    pub fn update_order_status(
        &mut self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, PersistenceError> {
        mutations::orders::update_order_status(&mut self.conn, order_id, status)
    }

    /// Deletes an order and its book references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    pub fn delete_order(&mut self, order_id: i64) -> Result<(), PersistenceError> {
        mutations::orders::delete_order(&mut self.conn, order_id)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a new session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails. Returns `Ok(None)`
    /// if the token is unknown.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionRecord>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token. Unknown tokens are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions expiring before `now` (ISO 8601).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }
}
