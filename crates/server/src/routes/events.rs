//! Events API routes: `/lokacije`, `/dogadjaji`, `/karte`, `/zaposleni`
//! and `/komentari`.
//!
//! This half of the API predates the shop's login system and stayed open;
//! it reads and writes the separate events database. The handlers follow
//! the same wire contract as the shop resources.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use zidar_core::{CommentId, EmployeeId, EventId, LocationId, TicketId};

use crate::db::{
    CommentRepository, EmployeeRepository, EventRepository, LocationRepository, TicketRepository,
    events::{CommentInput, EmployeeInput, EventInput, LocationInput, TicketInput},
};
use crate::error::{AppError, Result};
use crate::models::{Comment, Employee, Event, Location, Ticket};
use crate::state::AppState;

use super::{Deleted, Updated, require, require_str};

// =============================================================================
// Lokacije
// =============================================================================

/// Create the `/lokacije` router.
pub fn locations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(locations_list).post(locations_create))
        .route(
            "/{id}",
            get(locations_show)
                .put(locations_update)
                .delete(locations_destroy),
        )
}

/// Wire payload for creating or replacing a venue.
#[derive(Debug, Deserialize)]
pub struct LocationPayload {
    pub naziv: Option<String>,
    pub adresa: Option<String>,
    pub grad: Option<String>,
    pub kapacitet: Option<i64>,
}

struct LocationFields {
    name: String,
    address: String,
    city: String,
    capacity: i64,
}

impl LocationPayload {
    fn validated(self) -> Result<LocationFields> {
        Ok(LocationFields {
            name: require_str(self.naziv, "naziv")?,
            address: require_str(self.adresa, "adresa")?,
            city: require_str(self.grad, "grad")?,
            capacity: require(self.kapacitet, "kapacitet")?,
        })
    }
}

impl LocationFields {
    fn as_input(&self) -> LocationInput<'_> {
        LocationInput {
            name: &self.name,
            address: &self.address,
            city: &self.city,
            capacity: self.capacity,
        }
    }
}

async fn locations_list(State(state): State<AppState>) -> Result<Json<Vec<Location>>> {
    let locations = LocationRepository::new(state.events_pool()).get_all().await?;
    Ok(Json(locations))
}

async fn locations_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Location>> {
    LocationRepository::new(state.events_pool())
        .get_by_id(LocationId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Lokacija nije pronađena".to_owned()))
}

async fn locations_create(
    State(state): State<AppState>,
    Json(payload): Json<LocationPayload>,
) -> Result<(StatusCode, Json<Location>)> {
    let fields = payload.validated()?;
    let location = LocationRepository::new(state.events_pool())
        .add(&fields.as_input())
        .await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn locations_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<LocationPayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;
    LocationRepository::new(state.events_pool())
        .update_by_id(LocationId::new(id), &fields.as_input())
        .await?;
    Ok(Json(Updated { izmijenjeno: 1 }))
}

async fn locations_destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    LocationRepository::new(state.events_pool())
        .delete_by_id(LocationId::new(id))
        .await?;
    Ok(Json(Deleted { obrisano: 1 }))
}

// =============================================================================
// Dogadjaji
// =============================================================================

/// Create the `/dogadjaji` router.
pub fn events_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events_list).post(events_create))
        .route(
            "/{id}",
            get(events_show).put(events_update).delete(events_destroy),
        )
}

/// Wire payload for creating or replacing an event.
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub naziv: Option<String>,
    pub opis: Option<String>,
    pub datum: Option<DateTime<Utc>>,
    pub lokacija_id: Option<i64>,
    pub organizator: Option<String>,
}

struct EventFields {
    name: String,
    description: String,
    starts_at: DateTime<Utc>,
    location_id: LocationId,
    organizer: String,
}

impl EventPayload {
    fn validated(self) -> Result<EventFields> {
        Ok(EventFields {
            name: require_str(self.naziv, "naziv")?,
            description: require_str(self.opis, "opis")?,
            starts_at: require(self.datum, "datum")?,
            location_id: LocationId::new(require(self.lokacija_id, "lokacija_id")?),
            organizer: require_str(self.organizator, "organizator")?,
        })
    }
}

impl EventFields {
    fn as_input(&self) -> EventInput<'_> {
        EventInput {
            name: &self.name,
            description: &self.description,
            starts_at: self.starts_at,
            location_id: self.location_id,
            organizer: &self.organizer,
        }
    }
}

async fn events_list(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = EventRepository::new(state.events_pool()).get_all().await?;
    Ok(Json(events))
}

async fn events_show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Event>> {
    EventRepository::new(state.events_pool())
        .get_by_id(EventId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Događaj nije pronađen".to_owned()))
}

async fn events_create(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<Event>)> {
    let fields = payload.validated()?;
    let event = EventRepository::new(state.events_pool())
        .add(&fields.as_input())
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn events_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;
    EventRepository::new(state.events_pool())
        .update_by_id(EventId::new(id), &fields.as_input())
        .await?;
    Ok(Json(Updated { izmijenjeno: 1 }))
}

async fn events_destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    EventRepository::new(state.events_pool())
        .delete_by_id(EventId::new(id))
        .await?;
    Ok(Json(Deleted { obrisano: 1 }))
}

// =============================================================================
// Karte
// =============================================================================

/// Create the `/karte` router.
pub fn tickets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets_list).post(tickets_create))
        .route(
            "/{id}",
            get(tickets_show).put(tickets_update).delete(tickets_destroy),
        )
}

/// Wire payload for creating or replacing a ticket tier.
#[derive(Debug, Deserialize)]
pub struct TicketPayload {
    pub dogadjaj_id: Option<i64>,
    pub tip: Option<String>,
    pub cijena: Option<f64>,
    pub kolicina: Option<i64>,
}

struct TicketFields {
    event_id: EventId,
    kind: String,
    price: f64,
    quantity: i64,
}

impl TicketPayload {
    fn validated(self) -> Result<TicketFields> {
        Ok(TicketFields {
            event_id: EventId::new(require(self.dogadjaj_id, "dogadjaj_id")?),
            kind: require_str(self.tip, "tip")?,
            price: require(self.cijena, "cijena")?,
            quantity: require(self.kolicina, "kolicina")?,
        })
    }
}

impl TicketFields {
    fn as_input(&self) -> TicketInput<'_> {
        TicketInput {
            event_id: self.event_id,
            kind: &self.kind,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

async fn tickets_list(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>> {
    let tickets = TicketRepository::new(state.events_pool()).get_all().await?;
    Ok(Json(tickets))
}

async fn tickets_show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Ticket>> {
    TicketRepository::new(state.events_pool())
        .get_by_id(TicketId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Karta nije pronađena".to_owned()))
}

async fn tickets_create(
    State(state): State<AppState>,
    Json(payload): Json<TicketPayload>,
) -> Result<(StatusCode, Json<Ticket>)> {
    let fields = payload.validated()?;
    let ticket = TicketRepository::new(state.events_pool())
        .add(&fields.as_input())
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn tickets_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TicketPayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;
    TicketRepository::new(state.events_pool())
        .update_by_id(TicketId::new(id), &fields.as_input())
        .await?;
    Ok(Json(Updated { izmijenjeno: 1 }))
}

async fn tickets_destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    TicketRepository::new(state.events_pool())
        .delete_by_id(TicketId::new(id))
        .await?;
    Ok(Json(Deleted { obrisano: 1 }))
}

// =============================================================================
// Zaposleni
// =============================================================================

/// Create the `/zaposleni` router.
pub fn employees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees_list).post(employees_create))
        .route(
            "/{id}",
            get(employees_show)
                .put(employees_update)
                .delete(employees_destroy),
        )
}

/// Wire payload for creating or replacing a staff record. `dogadjaj_id` is
/// optional; staff without an assignment carry NULL.
#[derive(Debug, Deserialize)]
pub struct EmployeePayload {
    pub ime: Option<String>,
    pub prezime: Option<String>,
    pub pozicija: Option<String>,
    pub dogadjaj_id: Option<i64>,
}

struct EmployeeFields {
    first_name: String,
    last_name: String,
    role: String,
    event_id: Option<EventId>,
}

impl EmployeePayload {
    fn validated(self) -> Result<EmployeeFields> {
        Ok(EmployeeFields {
            first_name: require_str(self.ime, "ime")?,
            last_name: require_str(self.prezime, "prezime")?,
            role: require_str(self.pozicija, "pozicija")?,
            event_id: self.dogadjaj_id.map(EventId::new),
        })
    }
}

impl EmployeeFields {
    fn as_input(&self) -> EmployeeInput<'_> {
        EmployeeInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            role: &self.role,
            event_id: self.event_id,
        }
    }
}

async fn employees_list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    let employees = EmployeeRepository::new(state.events_pool()).get_all().await?;
    Ok(Json(employees))
}

async fn employees_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>> {
    EmployeeRepository::new(state.events_pool())
        .get_by_id(EmployeeId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Zaposleni nije pronađen".to_owned()))
}

async fn employees_create(
    State(state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<(StatusCode, Json<Employee>)> {
    let fields = payload.validated()?;
    let employee = EmployeeRepository::new(state.events_pool())
        .add(&fields.as_input())
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn employees_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;
    EmployeeRepository::new(state.events_pool())
        .update_by_id(EmployeeId::new(id), &fields.as_input())
        .await?;
    Ok(Json(Updated { izmijenjeno: 1 }))
}

async fn employees_destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    EmployeeRepository::new(state.events_pool())
        .delete_by_id(EmployeeId::new(id))
        .await?;
    Ok(Json(Deleted { obrisano: 1 }))
}

// =============================================================================
// Komentari
// =============================================================================

/// Create the `/komentari` router.
pub fn comments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments_list).post(comments_create))
        .route(
            "/{id}",
            get(comments_show)
                .put(comments_update)
                .delete(comments_destroy),
        )
}

/// Wire payload for creating or replacing a comment. `datum` defaults to
/// now on create.
#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    pub dogadjaj_id: Option<i64>,
    pub autor: Option<String>,
    pub sadrzaj: Option<String>,
    pub datum: Option<DateTime<Utc>>,
}

struct CommentFields {
    event_id: EventId,
    author: String,
    body: String,
    posted_at: DateTime<Utc>,
}

impl CommentPayload {
    fn validated(self) -> Result<CommentFields> {
        Ok(CommentFields {
            event_id: EventId::new(require(self.dogadjaj_id, "dogadjaj_id")?),
            author: require_str(self.autor, "autor")?,
            body: require_str(self.sadrzaj, "sadrzaj")?,
            posted_at: self.datum.unwrap_or_else(Utc::now),
        })
    }
}

impl CommentFields {
    fn as_input(&self) -> CommentInput<'_> {
        CommentInput {
            event_id: self.event_id,
            author: &self.author,
            body: &self.body,
            posted_at: self.posted_at,
        }
    }
}

async fn comments_list(State(state): State<AppState>) -> Result<Json<Vec<Comment>>> {
    let comments = CommentRepository::new(state.events_pool()).get_all().await?;
    Ok(Json(comments))
}

async fn comments_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Comment>> {
    CommentRepository::new(state.events_pool())
        .get_by_id(CommentId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Komentar nije pronađen".to_owned()))
}

async fn comments_create(
    State(state): State<AppState>,
    Json(payload): Json<CommentPayload>,
) -> Result<(StatusCode, Json<Comment>)> {
    let fields = payload.validated()?;
    let comment = CommentRepository::new(state.events_pool())
        .add(&fields.as_input())
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn comments_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CommentPayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;
    CommentRepository::new(state.events_pool())
        .update_by_id(CommentId::new(id), &fields.as_input())
        .await?;
    Ok(Json(Updated { izmijenjeno: 1 }))
}

async fn comments_destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    CommentRepository::new(state.events_pool())
        .delete_by_id(CommentId::new(id))
        .await?;
    Ok(Json(Deleted { obrisano: 1 }))
}
