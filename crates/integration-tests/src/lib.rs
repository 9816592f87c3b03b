//! Integration tests for Willowvale.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database, migrate, and seed
//! cargo run -p willowvale-cli -- migrate
//! cargo run -p willowvale-cli -- seed
//!
//! # Start the server
//! cargo run -p willowvale-server
//!
//! # Run integration tests
//! cargo test -p willowvale-integration-tests -- --ignored
//! ```
//!
//! The tests are `#[ignore]`d by default because they need a running server
//! and a seeded `PostgreSQL` database.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

/// Base URL for the clinic API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CLINIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client for API tests.
///
/// # Errors
///
/// Returns `reqwest::Error` if the client cannot be built.
pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}

/// Connect to the test database directly.
///
/// Used by tests that need to observe effects the API doesn't expose, such
/// as cascade deletes.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection fails.
pub async fn pool() -> Result<PgPool, sqlx::Error> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("CLINIC_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| sqlx::Error::Configuration("CLINIC_DATABASE_URL not set".into()))?;

    PgPool::connect(database_url.expose_secret()).await
}
