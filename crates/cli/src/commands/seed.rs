//! Demo data for local development.
//!
//! # Usage
//!
//! ```bash
//! zidar seed
//! ```
//!
//! Applies both schemas first, then loads a small catalog of construction
//! materials, two accounts and one upcoming event. Seeding is skipped for a
//! database that already has rows, so running it twice is harmless.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use zidar_core::AccountKind;
use zidar_server::db::articles::ArticleInput;
use zidar_server::db::categories::CategoryInput;
use zidar_server::db::events::{EmployeeInput, EventInput, LocationInput};
use zidar_server::db::users::NewUser;
use zidar_server::db::{
    self, ArticleRepository, CategoryRepository, EmployeeRepository, EventRepository,
    LocationRepository, RepositoryError, UserRepository,
};
use zidar_server::services::auth::{AuthError, hash_password};

use super::schema::{SchemaError, events_database_url, shop_database_url};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Database URL is missing from the environment.
    #[error(transparent)]
    Config(#[from] SchemaError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Demo password could not be hashed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] AuthError),
}

/// Load demo data into both databases.
///
/// # Errors
///
/// Returns `SeedError` if the environment is incomplete or an insert fails.
pub async fn demo() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let shop_pool = db::create_pool(&shop_database_url()?).await?;
    let events_pool = db::create_pool(&events_database_url()?).await?;

    tracing::info!("Ensuring schemas are applied...");
    db::apply_schema(&shop_pool, db::SHOP_SCHEMA).await?;
    db::apply_schema(&events_pool, db::EVENTS_SCHEMA).await?;

    if UserRepository::new(&shop_pool).get_all().await?.is_empty() {
        seed_shop(&shop_pool).await?;
    } else {
        tracing::warn!("Shop database already has accounts; skipping shop seed");
    }

    if LocationRepository::new(&events_pool)
        .get_all()
        .await?
        .is_empty()
    {
        seed_events(&events_pool).await?;
    } else {
        tracing::warn!("Events database already has venues; skipping events seed");
    }

    Ok(())
}

async fn seed_shop(pool: &SqlitePool) -> Result<(), SeedError> {
    let categories = CategoryRepository::new(pool);
    let cement = categories
        .add(&CategoryInput {
            name: "Cement i malteri",
            description: "Vezivni materijali za zidanje i malterisanje",
        })
        .await?;
    let blocks = categories
        .add(&CategoryInput {
            name: "Blokovi i cigle",
            description: "Zidni elementi za nosive i pregradne zidove",
        })
        .await?;
    let tools = categories
        .add(&CategoryInput {
            name: "Alati",
            description: "Ručni alati za gradilište",
        })
        .await?;

    let articles = ArticleRepository::new(pool);
    articles
        .add(&ArticleInput {
            name: "Cement 25kg",
            description: "Portland cement CEM II 42.5N",
            price: 12.5,
            stock: 120,
            category_id: cement.id,
            image: Some("cement-25.jpg"),
        })
        .await?;
    articles
        .add(&ArticleInput {
            name: "Gotovi malter 30kg",
            description: "Krečno-cementni malter za unutrašnje zidove",
            price: 9.9,
            stock: 80,
            category_id: cement.id,
            image: None,
        })
        .await?;
    articles
        .add(&ArticleInput {
            name: "Šuplji blok 25cm",
            description: "Glineni blok 250x190x190 za nosive zidove",
            price: 1.8,
            stock: 2400,
            category_id: blocks.id,
            image: Some("blok-25.jpg"),
        })
        .await?;
    articles
        .add(&ArticleInput {
            name: "Puna cigla",
            description: "Klasična puna opeka za fasade i dimnjake",
            price: 0.85,
            stock: 5000,
            category_id: blocks.id,
            image: None,
        })
        .await?;
    articles
        .add(&ArticleInput {
            name: "Zidarska mistrija",
            description: "Nehrđajuća mistrija 180mm s drvenom drškom",
            price: 14.0,
            stock: 35,
            category_id: tools.id,
            image: None,
        })
        .await?;

    let users = UserRepository::new(pool);
    let now = Utc::now();
    users
        .add(&NewUser {
            first_name: "Amar",
            last_name: "Begić",
            email: "amar@primjer.ba",
            password_hash: &hash_password("gradnja-2024")?,
            phone: "+387 61 111 222",
            address: "Zmaja od Bosne 8, Sarajevo",
            kind: AccountKind::Individual,
            company_name: None,
            tax_id: None,
            registered_at: now,
        })
        .await?;
    users
        .add(&NewUser {
            first_name: "Selma",
            last_name: "Hodžić",
            email: "admin@zidar.ba",
            password_hash: &hash_password("zidar-admin-2024")?,
            phone: "+387 61 333 444",
            address: "Obala Kulina bana 1, Sarajevo",
            kind: AccountKind::Admin,
            company_name: None,
            tax_id: None,
            registered_at: now,
        })
        .await?;

    tracing::info!("Shop seed complete: 3 categories, 5 articles, 2 accounts");
    tracing::info!("Demo login: amar@primjer.ba / gradnja-2024");
    tracing::info!("Admin login: admin@zidar.ba / zidar-admin-2024");
    Ok(())
}

async fn seed_events(pool: &SqlitePool) -> Result<(), SeedError> {
    let venue = LocationRepository::new(pool)
        .add(&LocationInput {
            name: "Dom mladih",
            address: "Terezije bb",
            city: "Sarajevo",
            capacity: 800,
        })
        .await?;

    let fair = EventRepository::new(pool)
        .add(&EventInput {
            name: "Sajam građevinarstva",
            description: "Godišnji sajam građevinskih materijala i opreme",
            starts_at: Utc::now() + Duration::days(30),
            location_id: venue.id,
            organizer: "Zidar d.o.o.",
        })
        .await?;

    EmployeeRepository::new(pool)
        .add(&EmployeeInput {
            first_name: "Emir",
            last_name: "Kovačević",
            role: "koordinator",
            event_id: Some(fair.id),
        })
        .await?;

    tracing::info!("Events seed complete: 1 venue, 1 event, 1 employee");
    Ok(())
}
