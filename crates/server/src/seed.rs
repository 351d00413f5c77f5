// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Startup data: sample catalog seeding and admin bootstrap.
//!
//! Registration can never produce an administrator, so the first admin
//! account has to come from somewhere — the `--create-admin` startup
//! flag lands here.

use rust_decimal::Decimal;
use time::Date;
use time::macros::date;
use tracing::info;

use bookstore_persistence::{Persistence, PersistenceError};

/// A seed catalog of well-known titles.
#[allow(clippy::type_complexity)]
const SAMPLE_BOOKS: &[(&str, &[&str], i64, Date, &str, i64)] = &[
    (
        "The Great Gatsby",
        &["F. Scott Fitzgerald"],
        1299,
        date!(1925 - 04 - 10),
        "9780743273565",
        15,
    ),
    (
        "To Kill a Mockingbird",
        &["Harper Lee"],
        1499,
        date!(1960 - 07 - 11),
        "9780446310789",
        20,
    ),
    (
        "1984",
        &["George Orwell"],
        1199,
        date!(1949 - 06 - 08),
        "9780451524935",
        18,
    ),
    (
        "Pride and Prejudice",
        &["Jane Austen"],
        999,
        date!(1813 - 01 - 28),
        "9780141439518",
        12,
    ),
    (
        "The Hobbit",
        &["J.R.R. Tolkien"],
        1599,
        date!(1937 - 09 - 21),
        "9780547928227",
        25,
    ),
    (
        "The Catcher in the Rye",
        &["J.D. Salinger"],
        1399,
        date!(1951 - 07 - 16),
        "9780316769488",
        10,
    ),
    (
        "Lord of the Flies",
        &["William Golding"],
        1099,
        date!(1954 - 09 - 17),
        "9780399501487",
        14,
    ),
    (
        "The Alchemist",
        &["Paulo Coelho"],
        1199,
        date!(1988 - 06 - 01),
        "9780062315007",
        22,
    ),
    (
        "Brave New World",
        &["Aldous Huxley"],
        1299,
        date!(1932 - 01 - 01),
        "9780060850524",
        16,
    ),
    (
        "The Da Vinci Code",
        &["Dan Brown"],
        1699,
        date!(2003 - 03 - 18),
        "9780307474278",
        30,
    ),
];

/// Loads the sample catalog into an empty store.
///
/// A store that already has books is left untouched, so the flag is safe
/// to pass on every start.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn seed_catalog(persistence: &mut Persistence) -> Result<usize, PersistenceError> {
    if !persistence.list_books()?.is_empty() {
        info!("Catalog already populated; skipping seed");
        return Ok(0);
    }

    for (title, authors, price_cents, release_date, isbn, stock) in SAMPLE_BOOKS {
        let authors: Vec<String> = authors.iter().map(ToString::to_string).collect();
        persistence.create_book(
            title,
            &authors,
            Decimal::new(*price_cents, 2),
            *release_date,
            isbn,
            *stock,
        )?;
    }

    info!(count = SAMPLE_BOOKS.len(), "Seeded sample catalog");

    Ok(SAMPLE_BOOKS.len())
}

/// Ensures an administrator account exists for `email`.
///
/// Returns `true` if the account was created, `false` if one already
/// existed (in which case the supplied password is ignored).
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn ensure_admin(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<bool, PersistenceError> {
    let email: String = email.trim().to_lowercase();

    if persistence.get_user_by_email(&email)?.is_some() {
        info!(email, "Admin account already exists");
        return Ok(false);
    }

    persistence.create_user(
        &email,
        password,
        "admin",
        "Admin",
        "User",
        "N/A",
        "N/A",
        "N/A",
        "0",
        "0000000000",
        date!(1970 - 01 - 01),
    )?;

    info!(email, "Admin account created");

    Ok(true)
}
