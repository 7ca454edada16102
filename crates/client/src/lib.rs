//! Shop-frontend client library: cart state, session handling and the
//! checkout flow against the shop REST API.
//!
//! The crate mirrors what the storefront pages do in the browser. The
//! cart lives in a [`store::CartStore`] blob and is managed by
//! [`cart::CartManager`]; [`session::Session`] wraps the login token;
//! [`checkout::place_order`] drives the order, order-item and transaction
//! requests through [`api::ShopApi`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod session;
pub mod store;

pub use api::{ApiError, ShopApi};
pub use cart::{CartEntry, CartError, CartManager};
pub use checkout::{CardDetails, CheckoutError, CheckoutForm, PlacedOrder, place_order};
pub use session::{Session, SessionError};
pub use store::{CartStore, MemoryCartStore};
