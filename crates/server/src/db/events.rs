//! Repositories for the events database.
//!
//! All five resources (`lokacije`, `dogadjaji`, `karte`, `zaposleni`,
//! `komentari`) follow the same CRUD surface as the shop tables. They take
//! the events pool, never the shop pool.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use zidar_core::{CommentId, EmployeeId, EventId, LocationId, TicketId};

use super::RepositoryError;
use crate::models::{Comment, Employee, Event, Location, Ticket};

fn not_found_on_zero(rows_affected: u64) -> Result<(), RepositoryError> {
    if rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

// =============================================================================
// Locations
// =============================================================================

/// Insert/update payload for `lokacije`.
#[derive(Debug)]
pub struct LocationInput<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub capacity: i64,
}

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: i64,
    naziv: String,
    adresa: String,
    grad: String,
    kapacitet: i64,
}

impl From<LocationRow> for Location {
    fn from(r: LocationRow) -> Self {
        Self {
            id: LocationId::new(r.id),
            name: r.naziv,
            address: r.adresa,
            city: r.grad,
            capacity: r.kapacitet,
        }
    }
}

/// Repository for venue database operations.
pub struct LocationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LocationRepository<'a> {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all locations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Location>, RepositoryError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT id, naziv, adresa, grad, kapacitet FROM lokacije ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Location::from).collect())
    }

    /// Get a location by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: LocationId) -> Result<Option<Location>, RepositoryError> {
        let row = sqlx::query_as::<_, LocationRow>(
            "SELECT id, naziv, adresa, grad, kapacitet FROM lokacije WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Location::from))
    }

    /// Create a new location.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, location: &LocationInput<'_>) -> Result<Location, RepositoryError> {
        let row = sqlx::query_as::<_, LocationRow>(
            "INSERT INTO lokacije (naziv, adresa, grad, kapacitet) VALUES (?, ?, ?, ?) \
             RETURNING id, naziv, adresa, grad, kapacitet",
        )
        .bind(location.name)
        .bind(location.address)
        .bind(location.city)
        .bind(location.capacity)
        .fetch_one(self.pool)
        .await?;
        Ok(Location::from(row))
    }

    /// Replace a location.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: LocationId,
        location: &LocationInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE lokacije SET naziv = ?, adresa = ?, grad = ?, kapacitet = ? WHERE id = ?",
        )
        .bind(location.name)
        .bind(location.address)
        .bind(location.city)
        .bind(location.capacity)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;
        not_found_on_zero(result.rows_affected())
    }

    /// Delete a location by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: LocationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM lokacije WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        not_found_on_zero(result.rows_affected())
    }
}

// =============================================================================
// Events
// =============================================================================

/// Insert/update payload for `dogadjaji`.
#[derive(Debug)]
pub struct EventInput<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub starts_at: DateTime<Utc>,
    pub location_id: LocationId,
    pub organizer: &'a str,
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: i64,
    naziv: String,
    opis: String,
    datum: DateTime<Utc>,
    lokacija_id: i64,
    organizator: String,
}

impl From<EventRow> for Event {
    fn from(r: EventRow) -> Self {
        Self {
            id: EventId::new(r.id),
            name: r.naziv,
            description: r.opis,
            starts_at: r.datum,
            location_id: LocationId::new(r.lokacija_id),
            organizer: r.organizator,
        }
    }
}

/// Repository for event database operations.
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all events, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, naziv, opis, datum, lokacija_id, organizator \
             FROM dogadjaji ORDER BY datum ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Get an event by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, naziv, opis, datum, lokacija_id, organizator FROM dogadjaji WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Event::from))
    }

    /// Create a new event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, event: &EventInput<'_>) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO dogadjaji (naziv, opis, datum, lokacija_id, organizator) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, naziv, opis, datum, lokacija_id, organizator",
        )
        .bind(event.name)
        .bind(event.description)
        .bind(event.starts_at)
        .bind(event.location_id.as_i64())
        .bind(event.organizer)
        .fetch_one(self.pool)
        .await?;
        Ok(Event::from(row))
    }

    /// Replace an event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: EventId,
        event: &EventInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE dogadjaji \
             SET naziv = ?, opis = ?, datum = ?, lokacija_id = ?, organizator = ? \
             WHERE id = ?",
        )
        .bind(event.name)
        .bind(event.description)
        .bind(event.starts_at)
        .bind(event.location_id.as_i64())
        .bind(event.organizer)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;
        not_found_on_zero(result.rows_affected())
    }

    /// Delete an event by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: EventId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dogadjaji WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        not_found_on_zero(result.rows_affected())
    }
}

// =============================================================================
// Tickets
// =============================================================================

/// Insert/update payload for `karte`.
#[derive(Debug)]
pub struct TicketInput<'a> {
    pub event_id: EventId,
    pub kind: &'a str,
    pub price: f64,
    pub quantity: i64,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    dogadjaj_id: i64,
    tip: String,
    cijena: f64,
    kolicina: i64,
}

impl From<TicketRow> for Ticket {
    fn from(r: TicketRow) -> Self {
        Self {
            id: TicketId::new(r.id),
            event_id: EventId::new(r.dogadjaj_id),
            kind: r.tip,
            price: r.cijena,
            quantity: r.kolicina,
        }
    }
}

/// Repository for ticket database operations.
pub struct TicketRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TicketRepository<'a> {
    /// Create a new ticket repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all tickets.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        let rows = sqlx::query_as::<_, TicketRow>(
            "SELECT id, dogadjaj_id, tip, cijena, kolicina FROM karte ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    /// Get a ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        let row = sqlx::query_as::<_, TicketRow>(
            "SELECT id, dogadjaj_id, tip, cijena, kolicina FROM karte WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Ticket::from))
    }

    /// Create a new ticket.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, ticket: &TicketInput<'_>) -> Result<Ticket, RepositoryError> {
        let row = sqlx::query_as::<_, TicketRow>(
            "INSERT INTO karte (dogadjaj_id, tip, cijena, kolicina) VALUES (?, ?, ?, ?) \
             RETURNING id, dogadjaj_id, tip, cijena, kolicina",
        )
        .bind(ticket.event_id.as_i64())
        .bind(ticket.kind)
        .bind(ticket.price)
        .bind(ticket.quantity)
        .fetch_one(self.pool)
        .await?;
        Ok(Ticket::from(row))
    }

    /// Replace a ticket.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: TicketId,
        ticket: &TicketInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE karte SET dogadjaj_id = ?, tip = ?, cijena = ?, kolicina = ? WHERE id = ?",
        )
        .bind(ticket.event_id.as_i64())
        .bind(ticket.kind)
        .bind(ticket.price)
        .bind(ticket.quantity)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;
        not_found_on_zero(result.rows_affected())
    }

    /// Delete a ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: TicketId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM karte WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        not_found_on_zero(result.rows_affected())
    }
}

// =============================================================================
// Employees
// =============================================================================

/// Insert/update payload for `zaposleni`.
#[derive(Debug)]
pub struct EmployeeInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub role: &'a str,
    pub event_id: Option<EventId>,
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    ime: String,
    prezime: String,
    pozicija: String,
    dogadjaj_id: Option<i64>,
}

impl From<EmployeeRow> for Employee {
    fn from(r: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(r.id),
            first_name: r.ime,
            last_name: r.prezime,
            role: r.pozicija,
            event_id: r.dogadjaj_id.map(EventId::new),
        }
    }
}

/// Repository for employee database operations.
pub struct EmployeeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all employees.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, ime, prezime, pozicija, dogadjaj_id FROM zaposleni ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Get an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, ime, prezime, pozicija, dogadjaj_id FROM zaposleni WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Employee::from))
    }

    /// Create a new employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, employee: &EmployeeInput<'_>) -> Result<Employee, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "INSERT INTO zaposleni (ime, prezime, pozicija, dogadjaj_id) VALUES (?, ?, ?, ?) \
             RETURNING id, ime, prezime, pozicija, dogadjaj_id",
        )
        .bind(employee.first_name)
        .bind(employee.last_name)
        .bind(employee.role)
        .bind(employee.event_id.map(|id| id.as_i64()))
        .fetch_one(self.pool)
        .await?;
        Ok(Employee::from(row))
    }

    /// Replace an employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: EmployeeId,
        employee: &EmployeeInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE zaposleni SET ime = ?, prezime = ?, pozicija = ?, dogadjaj_id = ? WHERE id = ?",
        )
        .bind(employee.first_name)
        .bind(employee.last_name)
        .bind(employee.role)
        .bind(employee.event_id.map(|id| id.as_i64()))
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;
        not_found_on_zero(result.rows_affected())
    }

    /// Delete an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: EmployeeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM zaposleni WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        not_found_on_zero(result.rows_affected())
    }
}

// =============================================================================
// Comments
// =============================================================================

/// Insert/update payload for `komentari`.
#[derive(Debug)]
pub struct CommentInput<'a> {
    pub event_id: EventId,
    pub author: &'a str,
    pub body: &'a str,
    pub posted_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    dogadjaj_id: i64,
    autor: String,
    sadrzaj: String,
    datum: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Self {
            id: CommentId::new(r.id),
            event_id: EventId::new(r.dogadjaj_id),
            author: r.autor,
            body: r.sadrzaj,
            posted_at: r.datum,
        }
    }
}

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all comments, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Comment>, RepositoryError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, dogadjaj_id, autor, sadrzaj, datum FROM komentari ORDER BY datum DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Get a comment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CommentId) -> Result<Option<Comment>, RepositoryError> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, dogadjaj_id, autor, sadrzaj, datum FROM komentari WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Comment::from))
    }

    /// Create a new comment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, comment: &CommentInput<'_>) -> Result<Comment, RepositoryError> {
        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO komentari (dogadjaj_id, autor, sadrzaj, datum) VALUES (?, ?, ?, ?) \
             RETURNING id, dogadjaj_id, autor, sadrzaj, datum",
        )
        .bind(comment.event_id.as_i64())
        .bind(comment.author)
        .bind(comment.body)
        .bind(comment.posted_at)
        .fetch_one(self.pool)
        .await?;
        Ok(Comment::from(row))
    }

    /// Replace a comment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: CommentId,
        comment: &CommentInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE komentari SET dogadjaj_id = ?, autor = ?, sadrzaj = ?, datum = ? WHERE id = ?",
        )
        .bind(comment.event_id.as_i64())
        .bind(comment.author)
        .bind(comment.body)
        .bind(comment.posted_at)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;
        not_found_on_zero(result.rows_affected())
    }

    /// Delete a comment by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: CommentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM komentari WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        not_found_on_zero(result.rows_affected())
    }
}
