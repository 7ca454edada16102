//! Events domain types.
//!
//! These back the events half of the API (`/lokacije`, `/dogadjaji`,
//! `/karte`, `/zaposleni`, `/komentari`). They share the server process with
//! the shop but live in a separate database file.

use chrono::{DateTime, Utc};
use serde::Serialize;

use zidar_core::{CommentId, EmployeeId, EventId, LocationId, TicketId};

/// A venue where events take place.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    /// Unique location ID.
    pub id: LocationId,
    /// Venue name.
    #[serde(rename = "naziv")]
    pub name: String,
    /// Street address.
    #[serde(rename = "adresa")]
    pub address: String,
    /// City.
    #[serde(rename = "grad")]
    pub city: String,
    /// Maximum attendees.
    #[serde(rename = "kapacitet")]
    pub capacity: i64,
}

/// A scheduled event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Unique event ID.
    pub id: EventId,
    /// Event name.
    #[serde(rename = "naziv")]
    pub name: String,
    /// Event description.
    #[serde(rename = "opis")]
    pub description: String,
    /// When the event starts.
    #[serde(rename = "datum")]
    pub starts_at: DateTime<Utc>,
    /// Venue.
    #[serde(rename = "lokacija_id")]
    pub location_id: LocationId,
    /// Organizer display name.
    #[serde(rename = "organizator")]
    pub organizer: String,
}

/// A ticket class sold for an event.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: TicketId,
    /// Event the ticket admits to.
    #[serde(rename = "dogadjaj_id")]
    pub event_id: EventId,
    /// Ticket class (e.g. "VIP", "regular").
    #[serde(rename = "tip")]
    pub kind: String,
    /// Price in KM.
    #[serde(rename = "cijena")]
    pub price: f64,
    /// Tickets available.
    #[serde(rename = "kolicina")]
    pub quantity: i64,
}

/// A staff member, optionally assigned to an event.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    /// Unique employee ID.
    pub id: EmployeeId,
    /// First name.
    #[serde(rename = "ime")]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "prezime")]
    pub last_name: String,
    /// Job title.
    #[serde(rename = "pozicija")]
    pub role: String,
    /// Event assignment, if any.
    #[serde(rename = "dogadjaj_id")]
    pub event_id: Option<EventId>,
}

/// A visitor comment on an event.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    /// Unique comment ID.
    pub id: CommentId,
    /// Event being commented on.
    #[serde(rename = "dogadjaj_id")]
    pub event_id: EventId,
    /// Author display name.
    #[serde(rename = "autor")]
    pub author: String,
    /// Comment text.
    #[serde(rename = "sadrzaj")]
    pub body: String,
    /// When the comment was posted.
    #[serde(rename = "datum")]
    pub posted_at: DateTime<Utc>,
}
