//! Veterinarian repository for database operations.
//!
//! Vets own their specialty assignments: saving a vet persists the
//! `vet_specialties` join rows alongside the vet row. Specialties themselves
//! are reference data with their own accessors, used mainly by seeding.

use std::collections::HashMap;

use sqlx::PgPool;

use willowvale_core::{SpecialtyId, VetId};

use super::RepositoryError;
use crate::models::{Specialty, Vet};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for vet queries.
#[derive(Debug, sqlx::FromRow)]
struct VetRow {
    id: i32,
    first_name: String,
    last_name: String,
}

impl From<VetRow> for Vet {
    fn from(row: VetRow) -> Self {
        Self {
            id: Some(VetId::new(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            specialties: Vec::new(),
        }
    }
}

/// Internal row type for specialty queries.
#[derive(Debug, sqlx::FromRow)]
struct SpecialtyRow {
    id: i32,
    name: String,
}

impl From<SpecialtyRow> for Specialty {
    fn from(row: SpecialtyRow) -> Self {
        Self {
            id: Some(SpecialtyId::new(row.id)),
            name: row.name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VetSpecialtyRow {
    vet_id: i32,
    id: i32,
    name: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for veterinarian database operations.
pub struct VetRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VetRepository<'a> {
    /// Create a new vet repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all vets with their specialties, ordered by last name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_all(&self) -> Result<Vec<Vet>, RepositoryError> {
        let rows = sqlx::query_as::<_, VetRow>(
            r"
            SELECT id, first_name, last_name
            FROM vets
            ORDER BY last_name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut vets: Vec<Vet> = rows.into_iter().map(Into::into).collect();
        self.attach_specialties(&mut vets).await?;
        Ok(vets)
    }

    /// Get a vet by their ID, with specialties loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_by_id(&self, id: VetId) -> Result<Option<Vet>, RepositoryError> {
        let row = sqlx::query_as::<_, VetRow>(
            r"
            SELECT id, first_name, last_name
            FROM vets
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut vets = vec![Vet::from(row)];
        self.attach_specialties(&mut vets).await?;
        Ok(vets.pop())
    }

    /// Save a vet, inserting if new and updating otherwise.
    ///
    /// The vet's specialty assignments are persisted with it: existing join
    /// rows are replaced by the specialties currently on the vet. A new vet
    /// has its identity assigned in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing vet no longer
    /// exists. Returns `RepositoryError::Database` for other database errors.
    pub async fn save(&self, vet: &mut Vet) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let vet_id = match vet.id {
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE vets
                    SET first_name = $1, last_name = $2
                    WHERE id = $3
                    ",
                )
                .bind(&vet.first_name)
                .bind(&vet.last_name)
                .bind(id.as_i32())
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }

                id
            }
            None => {
                let id = sqlx::query_scalar::<_, i32>(
                    r"
                    INSERT INTO vets (first_name, last_name)
                    VALUES ($1, $2)
                    RETURNING id
                    ",
                )
                .bind(&vet.first_name)
                .bind(&vet.last_name)
                .fetch_one(&mut *tx)
                .await?;

                VetId::new(id)
            }
        };

        // Replace the join rows with the current assignments
        sqlx::query(
            r"
            DELETE FROM vet_specialties
            WHERE vet_id = $1
            ",
        )
        .bind(vet_id.as_i32())
        .execute(&mut *tx)
        .await?;

        for specialty in &vet.specialties {
            let Some(specialty_id) = specialty.id else {
                return Err(RepositoryError::DataCorruption(format!(
                    "specialty '{}' has no identity; save it first",
                    specialty.name
                )));
            };

            sqlx::query(
                r"
                INSERT INTO vet_specialties (vet_id, specialty_id)
                VALUES ($1, $2)
                ",
            )
            .bind(vet_id.as_i32())
            .bind(specialty_id.as_i32())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        vet.id = Some(vet_id);
        Ok(())
    }

    /// Delete a vet by their ID.
    ///
    /// This cascades to the vet's specialty join rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the vet doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: VetId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM vets
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all specialties, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all_specialties(&self) -> Result<Vec<Specialty>, RepositoryError> {
        let rows = sqlx::query_as::<_, SpecialtyRow>(
            r"
            SELECT id, name
            FROM specialties
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Save a specialty, inserting if new and updating otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing specialty no longer
    /// exists. Returns `RepositoryError::Database` for other database errors.
    pub async fn save_specialty(&self, specialty: &mut Specialty) -> Result<(), RepositoryError> {
        match specialty.id {
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE specialties
                    SET name = $1
                    WHERE id = $2
                    ",
                )
                .bind(&specialty.name)
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }
            None => {
                let id = sqlx::query_scalar::<_, i32>(
                    r"
                    INSERT INTO specialties (name)
                    VALUES ($1)
                    RETURNING id
                    ",
                )
                .bind(&specialty.name)
                .fetch_one(self.pool)
                .await?;

                specialty.id = Some(SpecialtyId::new(id));
            }
        }

        Ok(())
    }

    /// Load specialties for the given vets.
    async fn attach_specialties(&self, vets: &mut [Vet]) -> Result<(), RepositoryError> {
        if vets.is_empty() {
            return Ok(());
        }

        let vet_ids: Vec<i32> = vets
            .iter()
            .filter_map(|v| v.id.map(|id| id.as_i32()))
            .collect();

        let rows = sqlx::query_as::<_, VetSpecialtyRow>(
            r"
            SELECT vs.vet_id, s.id, s.name
            FROM vet_specialties vs
            JOIN specialties s ON s.id = vs.specialty_id
            WHERE vs.vet_id = ANY($1)
            ORDER BY s.name
            ",
        )
        .bind(&vet_ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_vet: HashMap<i32, Vec<Specialty>> = HashMap::new();
        for row in rows {
            by_vet.entry(row.vet_id).or_default().push(Specialty {
                id: Some(SpecialtyId::new(row.id)),
                name: row.name,
            });
        }

        for vet in vets {
            if let Some(id) = vet.id {
                vet.specialties = by_vet.remove(&id.as_i32()).unwrap_or_default();
            }
        }

        Ok(())
    }
}
