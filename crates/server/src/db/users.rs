//! User repository for the `korisnici` table.
//!
//! Password hashes stay inside this module: domain `User` values never carry
//! them, and only `get_password_hash` exposes one, straight to the auth
//! service.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use zidar_core::{AccountKind, UserId};

use super::RepositoryError;
use crate::models::User;

/// Insert payload for `korisnici`. The password arrives already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub kind: AccountKind,
    pub company_name: Option<&'a str>,
    pub tax_id: Option<&'a str>,
    pub registered_at: DateTime<Utc>,
}

/// Update payload for `korisnici`. Replaces the full profile; the password
/// and registration date are not editable through this path.
#[derive(Debug)]
pub struct UserUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub kind: AccountKind,
    pub company_name: Option<&'a str>,
    pub tax_id: Option<&'a str>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    ime: String,
    prezime: String,
    email: String,
    telefon: String,
    adresa: String,
    tip_korisnika: String,
    naziv_firme: Option<String>,
    pdv_broj: Option<String>,
    datum_registracije: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    #[sqlx(flatten)]
    user: UserRow,
    sifra: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let kind = r.tip_korisnika.parse::<AccountKind>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid tip_korisnika in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(r.id),
            first_name: r.ime,
            last_name: r.prezime,
            email: r.email,
            phone: r.telefon,
            address: r.adresa,
            kind,
            company_name: r.naziv_firme,
            tax_id: r.pdv_broj,
            registered_at: r.datum_registracije,
        })
    }
}

const USER_COLUMNS: &str = "id, ime, prezime, email, telefon, adresa, tip_korisnika, \
                            naziv_firme, pdv_broj, datum_registracije";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all users, oldest account first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored account kind is invalid.
    pub async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM korisnici ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored account kind is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM korisnici WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, user: &NewUser<'_>) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO korisnici \
             (ime, prezime, email, sifra, telefon, adresa, tip_korisnika, naziv_firme, pdv_broj, datum_registracije) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.phone)
        .bind(user.address)
        .bind(user.kind.as_str())
        .bind(user.company_name)
        .bind(user.tax_id)
        .bind(user.registered_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        User::try_from(row)
    }

    /// Replace a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Conflict` if the new email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: UserId,
        user: &UserUpdate<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE korisnici \
             SET ime = ?, prezime = ?, email = ?, telefon = ?, adresa = ?, \
                 tip_korisnika = ?, naziv_firme = ?, pdv_broj = ? \
             WHERE id = ?",
        )
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.phone)
        .bind(user.address)
        .bind(user.kind.as_str())
        .bind(user.company_name)
        .bind(user.tax_id)
        .bind(id.as_i64())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM korisnici WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Get a user and their password hash by email.
    ///
    /// Returns `None` if no account uses the email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored account kind is invalid.
    pub async fn get_password_hash(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserAuthRow>(&format!(
            "SELECT {USER_COLUMNS}, sifra FROM korisnici WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let user = User::try_from(r.user)?;
        Ok(Some((user, r.sifra)))
    }
}
