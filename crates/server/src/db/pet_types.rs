//! Pet type repository for database operations.

use sqlx::PgPool;

use willowvale_core::PetTypeId;

use super::RepositoryError;
use crate::models::PetType;

/// Internal row type for pet type queries.
#[derive(Debug, sqlx::FromRow)]
struct PetTypeRow {
    id: i32,
    name: String,
}

impl From<PetTypeRow> for PetType {
    fn from(row: PetTypeRow) -> Self {
        Self {
            id: Some(PetTypeId::new(row.id)),
            name: row.name,
        }
    }
}

/// Repository for pet type database operations.
pub struct PetTypeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PetTypeRepository<'a> {
    /// Create a new pet type repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all pet types, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<PetType>, RepositoryError> {
        let rows = sqlx::query_as::<_, PetTypeRow>(
            r"
            SELECT id, name
            FROM types
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a pet type by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: PetTypeId) -> Result<Option<PetType>, RepositoryError> {
        let row = sqlx::query_as::<_, PetTypeRow>(
            r"
            SELECT id, name
            FROM types
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Save a pet type, inserting if new and updating otherwise.
    ///
    /// A new type has its identity assigned in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing type no longer
    /// exists. Returns `RepositoryError::Database` for other database errors.
    pub async fn save(&self, pet_type: &mut PetType) -> Result<(), RepositoryError> {
        match pet_type.id {
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE types
                    SET name = $1
                    WHERE id = $2
                    ",
                )
                .bind(&pet_type.name)
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
                    INSERT INTO types (name)
                    VALUES ($1)
                    RETURNING id
                    ",
                )
                .bind(&pet_type.name)
                .fetch_one(self.pool)
                .await?;

                pet_type.id = Some(PetTypeId::new(id));
            }
        }

        Ok(())
    }

    /// Delete a pet type by its ID.
    ///
    /// Fails with a database error while any pet still references the type.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the type doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: PetTypeId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM types
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
}
