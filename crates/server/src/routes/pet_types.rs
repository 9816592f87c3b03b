//! Pet type route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use willowvale_core::PetTypeId;

use crate::db::PetTypeRepository;
use crate::error::AppError;
use crate::models::PetType;
use crate::state::AppState;

/// List all pet types.
///
/// GET /api/pettypes
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PetType>>, AppError> {
    let repo = PetTypeRepository::new(state.pool());
    let types = repo.find_all().await?;
    Ok(Json(types))
}

/// Get a specific pet type.
///
/// GET /api/pettypes/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PetType>, AppError> {
    let repo = PetTypeRepository::new(state.pool());
    let pet_type = repo
        .find_by_id(PetTypeId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pet type with ID {id} not found")))?;

    Ok(Json(pet_type))
}
