//! Visit route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use willowvale_core::{OwnerId, PetId};

use crate::db::OwnerRepository;
use crate::error::AppError;
use crate::models::Visit;
use crate::state::AppState;
use crate::validation;

/// Visit create payload.
#[derive(Debug, Deserialize)]
pub struct VisitPayload {
    /// Visit date; defaults to today when omitted.
    pub date: Option<NaiveDate>,
    pub description: String,
}

/// Add a visit to an owner's pet.
///
/// POST /api/owners/{id}/pets/{pet_id}/visits
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(payload): Json<VisitPayload>,
) -> Result<(StatusCode, Json<Visit>), AppError> {
    let repo = OwnerRepository::new(state.pool());
    let owner = repo
        .find_by_id(OwnerId::new(owner_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Owner with ID {owner_id} not found")))?;

    let pet_id = PetId::new(pet_id);
    if owner.pet_by_id(pet_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Pet with ID {pet_id} not found for owner {owner_id}"
        )));
    }

    let mut visit = Visit::new(payload.description.trim());
    if let Some(date) = payload.date {
        visit.date = date;
    }

    let errors = validation::validate_visit(&visit);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    repo.save_visit(pet_id, &mut visit).await?;

    tracing::info!(visit_id = ?visit.id, "Visit recorded");
    Ok((StatusCode::CREATED, Json(visit)))
}
