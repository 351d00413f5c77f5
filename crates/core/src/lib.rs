// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order processing and access-control core.
//!
//! Everything in this crate is pure: no IO, no panics, no clocks. The
//! API layer resolves a [`Principal`] once per request and threads it
//! through [`authorize`]; order mutations price their book set through
//! [`price_order`] before anything is persisted.

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

mod error;
mod policy;
mod pricing;
mod principal;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use policy::{Action, authorize};
pub use pricing::price_order;
pub use principal::Principal;
