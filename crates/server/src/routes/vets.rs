//! Veterinarian route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use willowvale_core::VetId;

use crate::db::VetRepository;
use crate::error::AppError;
use crate::models::Vet;
use crate::state::AppState;

/// List all veterinarians with their specialties.
///
/// GET /api/vets
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Vet>>, AppError> {
    let repo = VetRepository::new(state.pool());
    let vets = repo.find_all().await?;
    Ok(Json(vets))
}

/// Get a specific veterinarian.
///
/// GET /api/vets/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vet>, AppError> {
    let repo = VetRepository::new(state.pool());
    let vet = repo
        .find_by_id(VetId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Veterinarian with ID {id} not found")))?;

    Ok(Json(vet))
}
