//! Field-level validation for incoming clinic records.
//!
//! Validators are pure functions: each takes an entity (or raw form input)
//! and returns the list of field errors found, in field order. Route
//! handlers turn a non-empty list into an HTTP 400 carrying the errors as
//! JSON.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use willowvale_core::Telephone;

use crate::models::{Pet, Visit};

const REQUIRED: &str = "required";

/// A single validation failure, tied to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }

    /// Create a "required" error for a field.
    #[must_use]
    pub fn required(field: &str) -> Self {
        Self::new(field, REQUIRED)
    }
}

/// Whether a date falls on or before today.
#[must_use]
pub fn is_past_or_today(date: NaiveDate) -> bool {
    date <= Local::now().date_naive()
}

/// Raw owner form input, before any of it has been parsed.
#[derive(Debug, Clone, Copy)]
pub struct OwnerInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub telephone: &'a str,
}

/// Validate owner input.
///
/// Every field is required and the telephone must be exactly ten digits.
/// On success the parsed [`Telephone`] is returned so callers don't parse
/// it twice.
///
/// # Errors
///
/// Returns the list of field errors, in field order.
pub fn validate_owner_input(input: &OwnerInput<'_>) -> Result<Telephone, Vec<FieldError>> {
    let mut errors = Vec::new();

    if input.first_name.trim().is_empty() {
        errors.push(FieldError::required("FirstName"));
    }
    if input.last_name.trim().is_empty() {
        errors.push(FieldError::required("LastName"));
    }
    if input.address.trim().is_empty() {
        errors.push(FieldError::required("Address"));
    }
    if input.city.trim().is_empty() {
        errors.push(FieldError::required("City"));
    }

    match Telephone::parse(input.telephone) {
        Ok(telephone) if errors.is_empty() => Ok(telephone),
        Ok(_) => Err(errors),
        Err(e) => {
            errors.push(FieldError::new("Telephone", &e.to_string()));
            Err(errors)
        }
    }
}

/// Validate a pet record.
///
/// The one hand-written cross-field validator in the system:
/// - `Name` is required (blank or whitespace fails)
/// - `Type` is required only while the pet is new; edits may omit it
/// - `BirthDate` is required
///
/// The duplicate-name and future-birth-date guards are the caller's
/// responsibility: they need the owner's other pets and the clock, and
/// belong with the handlers.
#[must_use]
pub fn validate_pet(pet: &Pet) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if pet.name.trim().is_empty() {
        errors.push(FieldError::required("Name"));
    }

    if pet.is_new() && pet.type_id.is_none() && pet.pet_type.is_none() {
        errors.push(FieldError::required("Type"));
    }

    if pet.birth_date.is_none() {
        errors.push(FieldError::required("BirthDate"));
    }

    errors
}

/// Validate a visit record.
#[must_use]
pub fn validate_visit(visit: &Visit) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if visit.description.trim().is_empty() {
        errors.push(FieldError::required("Description"));
    } else if visit.description.len() > Visit::MAX_DESCRIPTION_LENGTH {
        errors.push(FieldError::new(
            "Description",
            "cannot be longer than 255 characters",
        ));
    }

    errors
}
