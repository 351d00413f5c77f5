// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The resolved identity attached to a request.

use bookstore_domain::Role;

/// The identity (and role) a request acts under.
///
/// Resolved once per request from the session token and threaded through
/// every downstream check as an immutable value. Anything that fails to
/// resolve — no token, expired session, deleted user — is `Anonymous`,
/// the least-privileged principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// No valid session.
    Anonymous,
    /// A valid session backed by an existing user.
    Authenticated {
        /// The user's canonical identifier.
        user_id: i64,
        /// The user's role.
        role: Role,
    },
}

impl Principal {
    /// Returns true if this principal carries the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }

    /// Returns the authenticated user's id, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<i64> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_id, .. } => Some(*user_id),
        }
    }
}
