//! Core types for Zidar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod claims;
pub mod id;
pub mod money;
pub mod status;

pub use claims::TokenClaims;
pub use id::*;
pub use money::{OrderTotals, decimal_from_price, format_km, order_totals, price_to_f64, round2};
pub use status::*;
