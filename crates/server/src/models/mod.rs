//! Domain types for the clinic.
//!
//! These types represent validated domain objects separate from database row
//! types. An entity with `id: None` is "new" - it has not been persisted and
//! has no identity yet. Identity is assigned by the store on first save.

pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;

pub use owner::Owner;
pub use pet::{Pet, PetType};
pub use vet::{Specialty, Vet};
pub use visit::Visit;
