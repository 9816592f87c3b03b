//! Veterinarian and specialty domain types.

use serde::Serialize;

use willowvale_core::{SpecialtyId, VetId};

/// A veterinarian (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Vet {
    /// Unique vet ID, `None` until first persisted.
    pub id: Option<VetId>,
    /// Vet's first name.
    pub first_name: String,
    /// Vet's last name.
    pub last_name: String,
    /// Specialties this vet practices.
    pub specialties: Vec<Specialty>,
}

impl Vet {
    /// Whether this vet has been persisted yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Number of specialties this vet practices.
    #[must_use]
    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    /// Add a specialty to this vet.
    pub fn add_specialty(&mut self, specialty: Specialty) {
        self.specialties.push(specialty);
    }

    /// Specialties sorted by name.
    #[must_use]
    pub fn specialties_ordered_by_name(&self) -> Vec<&Specialty> {
        let mut specialties: Vec<&Specialty> = self.specialties.iter().collect();
        specialties.sort_by(|a, b| a.name.cmp(&b.name));
        specialties
    }
}

/// A veterinary specialty (radiology, surgery, dentistry, ...).
#[derive(Debug, Clone, Serialize)]
pub struct Specialty {
    /// Unique specialty ID, `None` until first persisted.
    pub id: Option<SpecialtyId>,
    /// Specialty name.
    pub name: String,
}

impl Specialty {
    /// Whether this specialty has been persisted yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialty(name: &str) -> Specialty {
        Specialty {
            id: None,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_nr_of_specialties() {
        let mut vet = Vet {
            id: Some(VetId::new(3)),
            first_name: "Linda".to_string(),
            last_name: "Douglas".to_string(),
            specialties: Vec::new(),
        };
        assert_eq!(vet.nr_of_specialties(), 0);

        vet.add_specialty(specialty("surgery"));
        vet.add_specialty(specialty("dentistry"));
        assert_eq!(vet.nr_of_specialties(), 2);
    }

    #[test]
    fn test_specialties_ordered_by_name() {
        let mut vet = Vet {
            id: Some(VetId::new(3)),
            first_name: "Linda".to_string(),
            last_name: "Douglas".to_string(),
            specialties: Vec::new(),
        };
        vet.add_specialty(specialty("surgery"));
        vet.add_specialty(specialty("dentistry"));

        let names: Vec<&str> = vet
            .specialties_ordered_by_name()
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["dentistry", "surgery"]);
    }
}
