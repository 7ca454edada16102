//! Domain types returned by the REST API.
//!
//! These are separate from the database row types in `crate::db`. Field names
//! are English in code; the serde renames map them onto the Bosnian wire
//! format the frontend and the back-office screens already speak.

pub mod article;
pub mod event;
pub mod order;
pub mod user;

pub use article::{Article, Category};
pub use event::{Comment, Employee, Event, Location, Ticket};
pub use order::{Order, OrderItem, Transaction};
pub use user::User;
