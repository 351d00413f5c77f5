// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides Axum extractors that resolve the request's
//! bearer token into a [`Principal`]. Resolution is total: a request
//! with no token, a bad header, an unknown or expired session, or a
//! deleted user proceeds as [`Principal::Anonymous`] and is judged by
//! the authorization policy like any other — extraction itself never
//! rejects a request.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use bookstore_api::AuthenticationService;
use bookstore_core::Principal;

use crate::AppState;

/// Pulls the raw bearer token, if any, out of the Authorization header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

/// Extractor for the raw session token.
///
/// Used by logout, which operates on the token itself rather than the
/// identity behind it.
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts)))
    }
}

/// Extractor for the request's resolved principal.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     CurrentPrincipal(principal): CurrentPrincipal,
/// ) -> Result<Json<Response>, HttpError> {
///     // principal: Principal
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Resolution Flow
///
/// 1. Extract `Authorization: Bearer <token>` header (absent is fine)
/// 2. Resolve the token via `AuthenticationService::resolve_principal`
/// 3. Any failure along the way yields `Principal::Anonymous`
pub struct CurrentPrincipal(pub Principal);

impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: Option<String> = bearer_token(parts);

        let mut persistence = state.persistence.lock().await;
        let principal: Principal =
            AuthenticationService::resolve_principal(&mut persistence, token.as_deref());
        drop(persistence);

        debug!(?principal, "Request principal resolved");

        Ok(Self(principal))
    }
}
