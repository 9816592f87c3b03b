//! Pet route handlers.
//!
//! Pets are created and edited through their owner. The cross-field pet
//! validator runs first; the duplicate-name and future-birth-date guards
//! stay here because they need the owner's other pets and the clock.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use willowvale_core::{OwnerId, PetId, PetTypeId};

use crate::db::{OwnerRepository, PetTypeRepository};
use crate::error::AppError;
use crate::models::{Owner, Pet};
use crate::state::AppState;
use crate::validation::{self, FieldError};

/// Pet create/update payload.
#[derive(Debug, Deserialize)]
pub struct PetPayload {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub type_id: Option<i32>,
}

/// Add a new pet to an owner.
///
/// POST /api/owners/{id}/pets
#[instrument(skip(state, payload), fields(pet_name = %payload.name))]
pub async fn create(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    Json(payload): Json<PetPayload>,
) -> Result<(StatusCode, Json<Pet>), AppError> {
    let repo = OwnerRepository::new(state.pool());
    let owner = find_owner(&repo, owner_id).await?;

    let mut pet = Pet {
        id: None,
        name: payload.name.trim().to_owned(),
        birth_date: payload.birth_date,
        type_id: payload.type_id.map(PetTypeId::new),
        pet_type: None,
        owner_id: owner.id,
        visits: Vec::new(),
    };

    let mut errors = validation::validate_pet(&pet);
    errors.extend(guard_errors(&state, &owner, &pet, None).await?);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let owner_id = OwnerId::new(owner_id);
    repo.save_pet(owner_id, &mut pet).await?;

    tracing::info!(pet_id = ?pet.id, "Pet added");
    Ok((StatusCode::CREATED, Json(pet)))
}

/// Edit an owner's pet.
///
/// PUT /api/owners/{id}/pets/{pet_id}
///
/// The type may be omitted; the stored type is kept.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Json(payload): Json<PetPayload>,
) -> Result<Json<Pet>, AppError> {
    let repo = OwnerRepository::new(state.pool());
    let owner = find_owner(&repo, owner_id).await?;

    let pet_id = PetId::new(pet_id);
    if owner.pet_by_id(pet_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Pet with ID {pet_id} not found for owner {owner_id}"
        )));
    }

    let mut pet = Pet {
        id: Some(pet_id),
        name: payload.name.trim().to_owned(),
        birth_date: payload.birth_date,
        type_id: payload.type_id.map(PetTypeId::new),
        pet_type: None,
        owner_id: owner.id,
        visits: Vec::new(),
    };

    let mut errors = validation::validate_pet(&pet);
    errors.extend(guard_errors(&state, &owner, &pet, Some(pet_id)).await?);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    repo.save_pet(OwnerId::new(owner_id), &mut pet).await?;
    Ok(Json(pet))
}

/// Look up an owner or fail with a 404 naming the id.
async fn find_owner(repo: &OwnerRepository<'_>, owner_id: i32) -> Result<Owner, AppError> {
    repo.find_by_id(OwnerId::new(owner_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Owner with ID {owner_id} not found")))
}

/// Controller-level guards: duplicate pet name for the owner, birth date in
/// the future, unknown pet type.
async fn guard_errors(
    state: &AppState,
    owner: &Owner,
    pet: &Pet,
    editing: Option<PetId>,
) -> Result<Vec<FieldError>, AppError> {
    let mut errors = Vec::new();

    if !pet.name.trim().is_empty() {
        let duplicate = match editing {
            // A pet may keep its own name on edit
            Some(pet_id) => owner
                .pet_by_name(&pet.name, false)
                .is_some_and(|existing| existing.id != Some(pet_id)),
            None => owner.pet_by_name(&pet.name, true).is_some(),
        };
        if duplicate {
            errors.push(FieldError::new("Name", "already exists"));
        }
    }

    if let Some(birth_date) = pet.birth_date
        && !validation::is_past_or_today(birth_date)
    {
        errors.push(FieldError::new(
            "BirthDate",
            "Birth date cannot be in the future",
        ));
    }

    if let Some(type_id) = pet.type_id {
        let types = PetTypeRepository::new(state.pool());
        if types.find_by_id(type_id).await?.is_none() {
            errors.push(FieldError::new("Type", "Please select a valid pet type"));
        }
    }

    Ok(errors)
}
