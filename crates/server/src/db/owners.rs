//! Owner repository for database operations.
//!
//! Owners are the aggregate root for pets and visits: both are loaded and
//! persisted through this repository. Queries use the runtime sqlx API with
//! internal row types converted into domain types.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;

use willowvale_core::{OwnerId, PetId, PetTypeId, Telephone, VisitId};

use super::RepositoryError;
use crate::models::{Owner, Pet, PetType, Visit};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for owner queries.
#[derive(Debug, sqlx::FromRow)]
struct OwnerRow {
    id: i32,
    first_name: String,
    last_name: String,
    address: String,
    city: String,
    telephone: String,
}

impl TryFrom<OwnerRow> for Owner {
    type Error = RepositoryError;

    fn try_from(row: OwnerRow) -> Result<Self, Self::Error> {
        let telephone = Telephone::parse(&row.telephone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid telephone in database: {e}"))
        })?;

        Ok(Self {
            id: Some(OwnerId::new(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            city: row.city,
            telephone,
            pets: Vec::new(),
        })
    }
}

/// Internal row type for pet queries, with the type joined in.
#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    id: i32,
    name: String,
    birth_date: NaiveDate,
    type_id: i32,
    type_name: String,
    owner_id: i32,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Self {
            id: Some(PetId::new(row.id)),
            name: row.name,
            birth_date: Some(row.birth_date),
            type_id: Some(PetTypeId::new(row.type_id)),
            pet_type: Some(PetType {
                id: Some(PetTypeId::new(row.type_id)),
                name: row.type_name,
            }),
            owner_id: Some(OwnerId::new(row.owner_id)),
            visits: Vec::new(),
        }
    }
}

/// Internal row type for visit queries.
#[derive(Debug, sqlx::FromRow)]
struct VisitRow {
    id: i32,
    visit_date: NaiveDate,
    description: String,
    pet_id: i32,
}

impl From<VisitRow> for Visit {
    fn from(row: VisitRow) -> Self {
        Self {
            id: Some(VisitId::new(row.id)),
            date: row.visit_date,
            description: row.description,
            pet_id: Some(PetId::new(row.pet_id)),
        }
    }
}

/// Escape `LIKE` wildcards in a user-supplied prefix.
fn escape_like(prefix: &str) -> String {
    prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for owner database operations.
pub struct OwnerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OwnerRepository<'a> {
    /// Create a new owner repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all owners with their pets and visits loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_all(&self) -> Result<Vec<Owner>, RepositoryError> {
        let rows = sqlx::query_as::<_, OwnerRow>(
            r"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            ORDER BY last_name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let owners = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Owner>, _>>()?;

        self.attach_pets(owners).await
    }

    /// Get an owner by their ID, with pets and visits loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_id(&self, id: OwnerId) -> Result<Option<Owner>, RepositoryError> {
        let row = sqlx::query_as::<_, OwnerRow>(
            r"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let owner: Owner = row.try_into()?;
        let mut owners = self.attach_pets(vec![owner]).await?;
        Ok(owners.pop())
    }

    /// Retrieve owners whose last name starts with the given prefix, with
    /// 1-based page semantics (page 1 = first `size` rows), ordered by last
    /// name ascending. Returns the page of owners and the total match count.
    ///
    /// An empty prefix matches every owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_last_name_starting_with(
        &self,
        last_name: &str,
        page: u32,
        size: u32,
    ) -> Result<(Vec<Owner>, i64), RepositoryError> {
        let pattern = format!("{}%", escape_like(last_name));
        let offset = i64::from(page.saturating_sub(1)) * i64::from(size);

        let total_count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM owners
            WHERE last_name LIKE $1
            ",
        )
        .bind(&pattern)
        .fetch_one(self.pool)
        .await?;

        let rows = sqlx::query_as::<_, OwnerRow>(
            r"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE last_name LIKE $1
            ORDER BY last_name, id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(&pattern)
        .bind(i64::from(size))
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let owners = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Owner>, _>>()?;

        let owners = self.attach_pets(owners).await?;
        Ok((owners, total_count))
    }

    /// Save an owner, inserting if new and updating otherwise.
    ///
    /// A new owner has its identity assigned in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing owner no longer
    /// exists. Returns `RepositoryError::Database` for other database errors.
    pub async fn save(&self, owner: &mut Owner) -> Result<(), RepositoryError> {
        match owner.id {
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE owners
                    SET first_name = $1, last_name = $2, address = $3, city = $4, telephone = $5
                    WHERE id = $6
                    ",
                )
                .bind(&owner.first_name)
                .bind(&owner.last_name)
                .bind(&owner.address)
                .bind(&owner.city)
                .bind(owner.telephone.as_str())
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
                    INSERT INTO owners (first_name, last_name, address, city, telephone)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    ",
                )
                .bind(&owner.first_name)
                .bind(&owner.last_name)
                .bind(&owner.address)
                .bind(&owner.city)
                .bind(owner.telephone.as_str())
                .fetch_one(self.pool)
                .await?;

                owner.id = Some(OwnerId::new(id));
            }
        }

        Ok(())
    }

    /// Save a pet for an owner, inserting if new and updating otherwise.
    ///
    /// On update the type may be absent; the stored type is kept. A new pet
    /// has its identity assigned in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the owner already has a pet
    /// with this name. Returns `RepositoryError::NotFound` if an existing
    /// pet does not belong to this owner.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save_pet(&self, owner_id: OwnerId, pet: &mut Pet) -> Result<(), RepositoryError> {
        match pet.id {
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE pets
                    SET name = $1, birth_date = $2, type_id = COALESCE($3, type_id)
                    WHERE id = $4 AND owner_id = $5
                    ",
                )
                .bind(&pet.name)
                .bind(pet.birth_date)
                .bind(pet.type_id.map(|t| t.as_i32()))
                .bind(id.as_i32())
                .bind(owner_id.as_i32())
                .execute(self.pool)
                .await
                .map_err(map_pet_name_conflict)?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }
            None => {
                let id = sqlx::query_scalar::<_, i32>(
                    r"
                    INSERT INTO pets (name, birth_date, type_id, owner_id)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    ",
                )
                .bind(&pet.name)
                .bind(pet.birth_date)
                .bind(pet.type_id.map(|t| t.as_i32()))
                .bind(owner_id.as_i32())
                .fetch_one(self.pool)
                .await
                .map_err(map_pet_name_conflict)?;

                pet.id = Some(PetId::new(id));
            }
        }

        pet.owner_id = Some(owner_id);
        Ok(())
    }

    /// Save a visit for a pet, inserting if new and updating otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing visit does not
    /// belong to this pet.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save_visit(
        &self,
        pet_id: PetId,
        visit: &mut Visit,
    ) -> Result<(), RepositoryError> {
        match visit.id {
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE visits
                    SET visit_date = $1, description = $2
                    WHERE id = $3 AND pet_id = $4
                    ",
                )
                .bind(visit.date)
                .bind(&visit.description)
                .bind(id.as_i32())
                .bind(pet_id.as_i32())
                .execute(self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }
            None => {
                let id = sqlx::query_scalar::<_, i32>(
                    r"
                    INSERT INTO visits (visit_date, description, pet_id)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    ",
                )
                .bind(visit.date)
                .bind(&visit.description)
                .bind(pet_id.as_i32())
                .fetch_one(self.pool)
                .await?;

                visit.id = Some(VisitId::new(id));
            }
        }

        visit.pet_id = Some(pet_id);
        Ok(())
    }

    /// Delete an owner by their ID.
    ///
    /// This cascades to the owner's pets and their visits.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the owner doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OwnerId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM owners
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

    /// Load pets (with their types and visits) for the given owners.
    async fn attach_pets(&self, mut owners: Vec<Owner>) -> Result<Vec<Owner>, RepositoryError> {
        if owners.is_empty() {
            return Ok(owners);
        }

        let owner_ids: Vec<i32> = owners
            .iter()
            .filter_map(|o| o.id.map(|id| id.as_i32()))
            .collect();

        let pet_rows = sqlx::query_as::<_, PetRow>(
            r"
            SELECT p.id, p.name, p.birth_date, p.type_id, t.name AS type_name, p.owner_id
            FROM pets p
            JOIN types t ON t.id = p.type_id
            WHERE p.owner_id = ANY($1)
            ORDER BY p.name, p.id
            ",
        )
        .bind(&owner_ids)
        .fetch_all(self.pool)
        .await?;

        let pet_ids: Vec<i32> = pet_rows.iter().map(|p| p.id).collect();
        let mut visits_by_pet: HashMap<i32, Vec<Visit>> = HashMap::new();

        if !pet_ids.is_empty() {
            let visit_rows = sqlx::query_as::<_, VisitRow>(
                r"
                SELECT id, visit_date, description, pet_id
                FROM visits
                WHERE pet_id = ANY($1)
                ORDER BY visit_date, id
                ",
            )
            .bind(&pet_ids)
            .fetch_all(self.pool)
            .await?;

            for row in visit_rows {
                visits_by_pet.entry(row.pet_id).or_default().push(row.into());
            }
        }

        let mut pets_by_owner: HashMap<i32, Vec<Pet>> = HashMap::new();
        for row in pet_rows {
            let owner_id = row.owner_id;
            let mut pet: Pet = row.into();
            if let Some(id) = pet.id {
                pet.visits = visits_by_pet.remove(&id.as_i32()).unwrap_or_default();
            }
            pets_by_owner.entry(owner_id).or_default().push(pet);
        }

        for owner in &mut owners {
            if let Some(id) = owner.id {
                owner.pets = pets_by_owner.remove(&id.as_i32()).unwrap_or_default();
            }
        }

        Ok(owners)
    }
}

/// Map a unique violation on the pet name index to a conflict.
fn map_pet_name_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("pet name already exists for this owner".to_owned());
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Davis"), "Davis");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
