//! Zidar Core - Shared types library.
//!
//! This crate provides common types used across all Zidar components:
//! - `server` - REST API process (shop + events)
//! - `client` - Shopper-side cart and checkout library
//! - `cli` - Command-line tools for schema bootstrap and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure computation - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere, including a future server-side order-total
//! verification step.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, status enums with their Bosnian wire tokens,
//!   identity-token claims, and decimal money/totals computation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
