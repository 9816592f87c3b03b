//! Pet and pet type domain types.

use chrono::NaiveDate;
use serde::Serialize;

use willowvale_core::{OwnerId, PetId, PetTypeId};

use super::Visit;

/// A pet (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Pet {
    /// Unique pet ID, `None` until first persisted.
    pub id: Option<PetId>,
    /// Pet's name, unique per owner (case-insensitive).
    pub name: String,
    /// Birth date; required and never in the future.
    pub birth_date: Option<NaiveDate>,
    /// Foreign key to the pet's type.
    pub type_id: Option<PetTypeId>,
    /// The pet's type, when loaded.
    pub pet_type: Option<PetType>,
    /// Owner this pet belongs to.
    pub owner_id: Option<OwnerId>,
    /// Clinic visits for this pet.
    pub visits: Vec<Visit>,
}

impl Pet {
    /// Whether this pet has been persisted yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Attach a visit to this pet.
    pub fn add_visit(&mut self, mut visit: Visit) {
        visit.pet_id = self.id;
        self.visits.push(visit);
    }

    /// Visits sorted by date, oldest first.
    #[must_use]
    pub fn visits_ordered_by_date(&self) -> Vec<&Visit> {
        let mut visits: Vec<&Visit> = self.visits.iter().collect();
        visits.sort_by_key(|v| v.date);
        visits
    }
}

/// A pet type (cat, dog, hamster, ...).
#[derive(Debug, Clone, Serialize)]
pub struct PetType {
    /// Unique type ID, `None` until first persisted.
    pub id: Option<PetTypeId>,
    /// Type name.
    pub name: String,
}

impl PetType {
    /// Whether this type has been persisted yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
