//! Owner route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use willowvale_core::OwnerId;

use crate::db::OwnerRepository;
use crate::error::AppError;
use crate::models::Owner;
use crate::state::AppState;
use crate::validation::{self, OwnerInput};

/// Default page size for owner searches.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Owner create/update payload.
#[derive(Debug, Deserialize)]
pub struct OwnerPayload {
    #[serde(default)]
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerPayload {
    fn as_input(&self) -> OwnerInput<'_> {
        OwnerInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            address: &self.address,
            city: &self.city,
            telephone: &self.telephone,
        }
    }
}

/// Search and pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct OwnerSearchQuery {
    pub last_name: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// One page of owner search results.
#[derive(Debug, Serialize)]
pub struct OwnersPage {
    pub owners: Vec<Owner>,
    pub total_count: i64,
    pub page: u32,
    pub size: u32,
}

/// List owners, optionally filtered by a last-name prefix.
///
/// GET /api/owners?last_name=&page=&size=
///
/// An absent or empty `last_name` is the broadest possible search and
/// returns every owner. Pages are 1-based.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OwnerSearchQuery>,
) -> Result<Json<OwnersPage>, AppError> {
    let last_name = query.last_name.unwrap_or_default();
    let page = query.page.unwrap_or(1).max(1);
    let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let repo = OwnerRepository::new(state.pool());
    let (owners, total_count) = repo
        .find_by_last_name_starting_with(&last_name, page, size)
        .await?;

    Ok(Json(OwnersPage {
        owners,
        total_count,
        page,
        size,
    }))
}

/// Get a specific owner with pets and visits.
///
/// GET /api/owners/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Owner>, AppError> {
    let repo = OwnerRepository::new(state.pool());
    let owner = repo
        .find_by_id(OwnerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Owner with ID {id} not found")))?;

    Ok(Json(owner))
}

/// Create a new owner.
///
/// POST /api/owners
#[instrument(skip(state, payload), fields(last_name = %payload.last_name))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OwnerPayload>,
) -> Result<(StatusCode, Json<Owner>), AppError> {
    let telephone = validation::validate_owner_input(&payload.as_input())
        .map_err(AppError::Validation)?;

    let mut owner = Owner {
        id: None,
        first_name: payload.first_name.trim().to_owned(),
        last_name: payload.last_name.trim().to_owned(),
        address: payload.address.trim().to_owned(),
        city: payload.city.trim().to_owned(),
        telephone,
        pets: Vec::new(),
    };

    let repo = OwnerRepository::new(state.pool());
    repo.save(&mut owner).await?;

    tracing::info!(owner_id = ?owner.id, "Owner created");
    Ok((StatusCode::CREATED, Json(owner)))
}

/// Update an existing owner.
///
/// PUT /api/owners/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OwnerPayload>,
) -> Result<Json<Owner>, AppError> {
    if let Some(payload_id) = payload.id
        && payload_id != id
    {
        return Err(AppError::BadRequest("ID mismatch".to_owned()));
    }

    let telephone = validation::validate_owner_input(&payload.as_input())
        .map_err(AppError::Validation)?;

    let repo = OwnerRepository::new(state.pool());
    let existing = repo
        .find_by_id(OwnerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Owner with ID {id} not found")))?;

    let mut owner = Owner {
        id: existing.id,
        first_name: payload.first_name.trim().to_owned(),
        last_name: payload.last_name.trim().to_owned(),
        address: payload.address.trim().to_owned(),
        city: payload.city.trim().to_owned(),
        telephone,
        pets: existing.pets,
    };

    repo.save(&mut owner).await?;
    Ok(Json(owner))
}

/// Delete an owner.
///
/// DELETE /api/owners/{id}
///
/// Cascades to the owner's pets and their visits.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let repo = OwnerRepository::new(state.pool());
    match repo.delete(OwnerId::new(id)).await {
        Ok(()) => {
            tracing::info!("Owner deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(crate::db::RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("Owner with ID {id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}
