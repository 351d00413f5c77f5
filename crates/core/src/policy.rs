// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization policy.
//!
//! A single pure decision function maps a `(Principal, Action)` pair to
//! allow or deny. Ownership-scoped actions carry the owning user's id so
//! the policy can compare it against the principal — handlers never
//! re-derive admin status on their own.

use crate::error::CoreError;
use crate::principal::Principal;
use bookstore_domain::Role;

/// An action a principal may attempt, with the resource context needed
/// to decide ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read catalog data (list, get, search).
    ReadCatalog,
    /// Create, update, or delete a catalog book.
    WriteCatalog,
    /// Register a new customer account.
    Register,
    /// Place a new order.
    CreateOrder,
    /// Read a single order owned by `owner`.
    ReadOrder {
        /// The order's `customer_id`.
        owner: i64,
    },
    /// List every order in the system.
    ListOrders,
    /// List the orders belonging to `customer`.
    ListCustomerOrders {
        /// The customer whose orders are requested.
        customer: i64,
    },
    /// Replace an order's book set.
    UpdateOrderBooks,
    /// Change an order's lifecycle status.
    UpdateOrderStatus,
    /// Delete an order.
    DeleteOrder,
    /// List every customer record.
    ListCustomers,
    /// Read the customer record of `subject`.
    ReadCustomer {
        /// The customer being read.
        subject: i64,
    },
    /// Update the customer record of `subject`.
    UpdateCustomer {
        /// The customer being updated.
        subject: i64,
    },
    /// Delete a customer record.
    DeleteCustomer,
}

impl Action {
    /// Returns a stable name for the action, used in denials and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReadCatalog => "read_catalog",
            Self::WriteCatalog => "write_catalog",
            Self::Register => "register",
            Self::CreateOrder => "create_order",
            Self::ReadOrder { .. } => "read_order",
            Self::ListOrders => "list_orders",
            Self::ListCustomerOrders { .. } => "list_customer_orders",
            Self::UpdateOrderBooks => "update_order_books",
            Self::UpdateOrderStatus => "update_order_status",
            Self::DeleteOrder => "delete_order",
            Self::ListCustomers => "list_customers",
            Self::ReadCustomer { .. } => "read_customer",
            Self::UpdateCustomer { .. } => "update_customer",
            Self::DeleteCustomer => "delete_customer",
        }
    }
}

/// Decides whether `principal` may perform `action`.
///
/// Rules, in precedence order:
/// 1. Anonymous callers may only read the catalog and register.
/// 2. Administrators may do everything.
/// 3. Regular users may place orders, read their own orders and order
///    lists, and read/update their own profile.
/// 4. Everything else is denied.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// # Errors
///
/// Returns `CoreError::Denied` naming the action when the principal is
/// not permitted to perform it.
pub fn authorize(principal: &Principal, action: &Action) -> Result<(), CoreError> {
    let allowed = match principal {
        Principal::Anonymous => matches!(action, Action::ReadCatalog | Action::Register),
        Principal::Authenticated {
            role: Role::Admin, ..
        } => true,
        Principal::Authenticated {
            user_id,
            role: Role::User,
        } => match action {
            Action::ReadCatalog | Action::Register | Action::CreateOrder => true,
            Action::ReadOrder { owner } => owner == user_id,
            Action::ListCustomerOrders { customer } => customer == user_id,
            Action::ReadCustomer { subject } | Action::UpdateCustomer { subject } => {
                subject == user_id
            }
            Action::ListOrders
            | Action::UpdateOrderBooks
            | Action::UpdateOrderStatus
            | Action::DeleteOrder
            | Action::ListCustomers
            | Action::DeleteCustomer
            | Action::WriteCatalog => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        Err(CoreError::Denied {
            action: action.name().to_string(),
        })
    }
}
