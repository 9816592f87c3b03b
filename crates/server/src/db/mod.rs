//! Database operations for the clinic `PostgreSQL` store.
//!
//! # Tables
//!
//! - `owners` - Pet owners
//! - `pets` - Pets, one owner each, unique name per owner
//! - `types` - Pet types (cat, dog, ...)
//! - `visits` - Clinic visits, one pet each
//! - `vets` - Veterinarians
//! - `specialties` - Veterinary specialties
//! - `vet_specialties` - Vet/specialty join rows
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p willowvale-cli -- migrate
//! ```

pub mod owners;
pub mod pet_types;
pub mod vets;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use owners::OwnerRepository;
pub use pet_types::PetTypeRepository;
pub use vets::VetRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate pet name for an owner).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
