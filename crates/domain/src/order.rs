// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order entity.

use crate::order_status::OrderStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer order referencing one or more catalog books.
///
/// `order_value` is a derived snapshot: it equals the sum of the referenced
/// books' prices at the time `book_ids` was last modified. It is recomputed
/// on creation and on book-set updates, never on reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The order's canonical identifier.
    pub id: i64,
    /// When the order was placed (ISO 8601).
    pub order_date: String,
    /// Snapshot of the summed book prices. Never negative.
    #[serde(with = "rust_decimal::serde::str")]
    pub order_value: Decimal,
    /// Referenced books, in order, duplicates permitted. Never empty.
    pub book_ids: Vec<i64>,
    /// The user this order belongs to.
    pub customer_id: i64,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last modification timestamp (ISO 8601).
    pub updated_at: String,
}
