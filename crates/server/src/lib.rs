//! Zidar Server - REST API process.
//!
//! One binary serves two halves: the shop API (accounts, catalog, orders,
//! payment records, backed by the shop database) and the events API
//! (venues, events, tickets, staff, comments, backed by its own database).
//! All request and response field names are the Bosnian ones the existing
//! storefront already speaks.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration with secret validation
//! - [`db`] - SQLite pools, schema bootstrap, and per-table repositories
//! - [`error`] - `AppError` and its HTTP status/body mapping
//! - [`middleware`] - Bearer-token extraction for protected routes
//! - [`models`] - Serialized domain types with their wire field names
//! - [`routes`] - Axum handlers and the full application router
//! - [`services`] - Registration, login, and token signing
//! - [`state`] - Shared application state
//!
//! The binary target wires these together; integration tests build the same
//! router via [`routes::app`] against in-memory databases.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
