//! Owner domain type.

use serde::Serialize;

use willowvale_core::{OwnerId, PetId, Telephone};

use super::{Pet, Visit};

/// A pet owner (domain type).
///
/// The aggregate root for pets and their visits: pets are added and
/// persisted through their owner, never on their own.
#[derive(Debug, Clone, Serialize)]
pub struct Owner {
    /// Unique owner ID, `None` until first persisted.
    pub id: Option<OwnerId>,
    /// Owner's first name.
    pub first_name: String,
    /// Owner's last name.
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Contact telephone number (10 digits).
    pub telephone: Telephone,
    /// Pets belonging to this owner.
    pub pets: Vec<Pet>,
}

impl Owner {
    /// Whether this owner has been persisted yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Add a new pet to this owner.
    ///
    /// Already-persisted pets are attached by the store, not through this
    /// method, so anything with an identity is ignored.
    pub fn add_pet(&mut self, mut pet: Pet) {
        if pet.is_new() {
            pet.owner_id = self.id;
            self.pets.push(pet);
        }
    }

    /// Return the pet with the given name, or `None` if this owner has no
    /// such pet. Matching is case-insensitive.
    ///
    /// With `ignore_new`, pets that have not been persisted yet are skipped,
    /// which lets the duplicate-name check exclude the pet being created.
    #[must_use]
    pub fn pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let name = name.to_lowercase();
        self.pets
            .iter()
            .filter(|pet| !ignore_new || !pet.is_new())
            .find(|pet| pet.name.to_lowercase() == name)
    }

    /// Return the pet with the given ID, or `None` if this owner has no
    /// such pet.
    #[must_use]
    pub fn pet_by_id(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == Some(id))
    }

    /// Add a visit to the pet with the given ID.
    ///
    /// Returns `false` when this owner has no such pet.
    pub fn add_visit(&mut self, pet_id: PetId, visit: Visit) -> bool {
        match self.pets.iter_mut().find(|pet| pet.id == Some(pet_id)) {
            Some(pet) => {
                pet.add_visit(visit);
                true
            }
            None => false,
        }
    }

    /// Pets sorted by name.
    #[must_use]
    pub fn pets_ordered_by_name(&self) -> Vec<&Pet> {
        let mut pets: Vec<&Pet> = self.pets.iter().collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        pets
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use willowvale_core::{PetId, PetTypeId};

    use super::*;
    use crate::models::PetType;

    fn owner() -> Owner {
        Owner {
            id: Some(OwnerId::new(1)),
            first_name: "George".to_string(),
            last_name: "Franklin".to_string(),
            address: "110 W. Liberty St.".to_string(),
            city: "Madison".to_string(),
            telephone: Telephone::parse("6085551023").unwrap(),
            pets: Vec::new(),
        }
    }

    fn pet(id: Option<i32>, name: &str) -> Pet {
        Pet {
            id: id.map(PetId::new),
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2010, 9, 7),
            type_id: Some(PetTypeId::new(1)),
            pet_type: Some(PetType {
                id: Some(PetTypeId::new(1)),
                name: "cat".to_string(),
            }),
            owner_id: None,
            visits: Vec::new(),
        }
    }

    #[test]
    fn test_add_pet_attaches_new_pets_only() {
        let mut owner = owner();
        owner.add_pet(pet(None, "Leo"));
        owner.add_pet(pet(Some(5), "Basil"));

        assert_eq!(owner.pets.len(), 1);
        assert_eq!(owner.pets.first().unwrap().owner_id, owner.id);
    }

    #[test]
    fn test_pet_by_name_is_case_insensitive() {
        let mut owner = owner();
        owner.add_pet(pet(None, "Leo"));

        assert!(owner.pet_by_name("leo", false).is_some());
        assert!(owner.pet_by_name("LEO", false).is_some());
        assert!(owner.pet_by_name("basil", false).is_none());
    }

    #[test]
    fn test_pet_by_name_ignore_new() {
        let mut owner = owner();
        owner.add_pet(pet(None, "Leo"));

        assert!(owner.pet_by_name("Leo", true).is_none());
        assert!(owner.pet_by_name("Leo", false).is_some());
    }

    #[test]
    fn test_pet_by_id() {
        let mut owner = owner();
        let mut persisted = pet(None, "Jewel");
        persisted.id = Some(PetId::new(9));
        owner.pets.push(persisted);

        assert!(owner.pet_by_id(PetId::new(9)).is_some());
        assert!(owner.pet_by_id(PetId::new(10)).is_none());
    }

    #[test]
    fn test_add_visit_to_known_pet() {
        let mut owner = owner();
        let mut persisted = pet(None, "Samantha");
        persisted.id = Some(PetId::new(7));
        owner.pets.push(persisted);

        assert!(owner.add_visit(PetId::new(7), Visit::new("rabies shot")));
        assert!(!owner.add_visit(PetId::new(8), Visit::new("rabies shot")));
        assert_eq!(owner.pet_by_id(PetId::new(7)).unwrap().visits.len(), 1);
    }

    #[test]
    fn test_pets_ordered_by_name() {
        let mut owner = owner();
        owner.add_pet(pet(None, "Sly"));
        owner.add_pet(pet(None, "Lucky"));

        let names: Vec<&str> = owner
            .pets_ordered_by_name()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Lucky", "Sly"]);
    }
}
