//! Visit domain type.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use willowvale_core::{PetId, VisitId};

/// A clinic visit (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    /// Unique visit ID, `None` until first persisted.
    pub id: Option<VisitId>,
    /// Date of the visit.
    pub date: NaiveDate,
    /// What happened during the visit (at most 255 characters).
    pub description: String,
    /// Pet this visit belongs to.
    pub pet_id: Option<PetId>,
}

impl Visit {
    /// Maximum length of a visit description.
    pub const MAX_DESCRIPTION_LENGTH: usize = 255;

    /// Create a new visit dated today.
    #[must_use]
    pub fn new(description: &str) -> Self {
        Self {
            id: None,
            date: Local::now().date_naive(),
            description: description.to_owned(),
            pet_id: None,
        }
    }

    /// Whether this visit has been persisted yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
