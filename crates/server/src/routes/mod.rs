//! HTTP route handlers for the clinic JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Owners
//! GET    /api/owners                  - List / search by last-name prefix (paginated)
//! POST   /api/owners                  - Create owner
//! GET    /api/owners/{id}             - Owner with pets and visits
//! PUT    /api/owners/{id}             - Update owner
//! DELETE /api/owners/{id}             - Delete owner (cascades)
//!
//! # Pets (through the owner aggregate)
//! POST /api/owners/{id}/pets                   - Add pet
//! PUT  /api/owners/{id}/pets/{pet_id}          - Edit pet
//! POST /api/owners/{id}/pets/{pet_id}/visits   - Add visit
//!
//! # Pet types
//! GET /api/pettypes             - List pet types
//! GET /api/pettypes/{id}        - Pet type detail
//!
//! # Vets
//! GET /api/vets                 - List vets with specialties
//! GET /api/vets/{id}            - Vet detail
//! ```

pub mod owners;
pub mod pet_types;
pub mod pets;
pub mod vets;
pub mod visits;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the owner routes router, including the pet and visit routes that
/// go through the owner aggregate.
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(owners::index).post(owners::create))
        .route(
            "/{id}",
            get(owners::show).put(owners::update).delete(owners::destroy),
        )
        .route("/{id}/pets", post(pets::create))
        .route("/{id}/pets/{pet_id}", put(pets::update))
        .route("/{id}/pets/{pet_id}/visits", post(visits::create))
}

/// Create the pet type routes router.
pub fn pet_type_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pet_types::index))
        .route("/{id}", get(pet_types::show))
}

/// Create the vet routes router.
pub fn vet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(vets::index))
        .route("/{id}", get(vets::show))
}

/// Create all routes for the clinic API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/owners", owner_routes())
        .nest("/api/pettypes", pet_type_routes())
        .nest("/api/vets", vet_routes())
}
