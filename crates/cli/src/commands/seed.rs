//! Seed the database with the sample clinic data set.
//!
//! Loads the canonical demo records through the repositories: six vets,
//! three specialties, six pet types, ten owners, thirteen pets, and four
//! visits. Running against a database that already has owners is a no-op.

use chrono::NaiveDate;
use secrecy::SecretString;
use tracing::info;

use willowvale_core::Telephone;
use willowvale_server::db::{self, OwnerRepository, PetTypeRepository, VetRepository};
use willowvale_server::models::{Owner, Pet, PetType, Specialty, Vet, Visit};

const VETS: &[(&str, &str)] = &[
    ("James", "Carter"),
    ("Helen", "Leary"),
    ("Linda", "Douglas"),
    ("Rafael", "Ortega"),
    ("Henry", "Stevens"),
    ("Sharon", "Jenkins"),
];

const SPECIALTIES: &[&str] = &["radiology", "surgery", "dentistry"];

/// Vet/specialty pairings, as (vet index, specialty index).
const VET_SPECIALTIES: &[(usize, usize)] = &[
    (1, 0), // Helen Leary - radiology
    (2, 1), // Linda Douglas - surgery
    (2, 2), // Linda Douglas - dentistry
    (3, 1), // Rafael Ortega - surgery
    (4, 0), // Henry Stevens - radiology
];

const PET_TYPES: &[&str] = &["cat", "dog", "lizard", "snake", "bird", "hamster"];

const OWNERS: &[(&str, &str, &str, &str, &str)] = &[
    ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

/// Pets, as (name, birth date, pet type index, owner index).
const PETS: &[(&str, (i32, u32, u32), usize, usize)] = &[
    ("Leo", (2010, 9, 7), 0, 0),
    ("Basil", (2012, 8, 6), 5, 1),
    ("Rosy", (2011, 4, 17), 1, 2),
    ("Jewel", (2010, 3, 7), 1, 2),
    ("Iggy", (2010, 11, 30), 2, 3),
    ("George", (2010, 1, 20), 3, 4),
    ("Samantha", (2012, 9, 4), 0, 5),
    ("Max", (2012, 9, 4), 0, 5),
    ("Lucky", (2011, 8, 6), 4, 6),
    ("Mulligan", (2007, 2, 24), 1, 7),
    ("Freddy", (2010, 3, 9), 4, 8),
    ("Lucky", (2010, 6, 24), 1, 9),
    ("Sly", (2012, 6, 8), 0, 9),
];

/// Visits, as (pet index, date, description).
const VISITS: &[(usize, (i32, u32, u32), &str)] = &[
    (6, (2013, 1, 1), "rabies shot"), // Samantha
    (7, (2013, 1, 2), "rabies shot"), // Max
    (7, (2013, 1, 3), "neutered"),    // Max
    (6, (2013, 1, 4), "spayed"),      // Samantha
];

/// Seed the database with the sample data set.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CLINIC_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "CLINIC_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let owners = OwnerRepository::new(&pool);
    if !owners.find_all().await?.is_empty() {
        info!("Database already seeded; nothing to do");
        return Ok(());
    }

    // Specialties first, so vets can reference them. Reuse any that a
    // partial earlier run left behind.
    let vets = VetRepository::new(&pool);
    let existing = vets.find_all_specialties().await?;
    let mut specialties = Vec::with_capacity(SPECIALTIES.len());
    for name in SPECIALTIES {
        if let Some(specialty) = existing.iter().find(|s| s.name == *name) {
            specialties.push(specialty.clone());
        } else {
            let mut specialty = Specialty {
                id: None,
                name: (*name).to_owned(),
            };
            vets.save_specialty(&mut specialty).await?;
            specialties.push(specialty);
        }
    }
    info!(count = specialties.len(), "Seeded specialties");

    let mut seeded_vets = Vec::with_capacity(VETS.len());
    for (index, (first_name, last_name)) in VETS.iter().enumerate() {
        let mut vet = Vet {
            id: None,
            first_name: (*first_name).to_owned(),
            last_name: (*last_name).to_owned(),
            specialties: Vec::new(),
        };
        for (vet_index, specialty_index) in VET_SPECIALTIES {
            if *vet_index == index
                && let Some(specialty) = specialties.get(*specialty_index)
            {
                vet.add_specialty(specialty.clone());
            }
        }
        vets.save(&mut vet).await?;
        seeded_vets.push(vet);
    }
    info!(count = seeded_vets.len(), "Seeded vets");

    let types = PetTypeRepository::new(&pool);
    let mut pet_types = Vec::with_capacity(PET_TYPES.len());
    for name in PET_TYPES {
        let mut pet_type = PetType {
            id: None,
            name: (*name).to_owned(),
        };
        types.save(&mut pet_type).await?;
        pet_types.push(pet_type);
    }
    info!(count = pet_types.len(), "Seeded pet types");

    let mut seeded_owners = Vec::with_capacity(OWNERS.len());
    for (first_name, last_name, address, city, telephone) in OWNERS {
        let mut owner = Owner {
            id: None,
            first_name: (*first_name).to_owned(),
            last_name: (*last_name).to_owned(),
            address: (*address).to_owned(),
            city: (*city).to_owned(),
            telephone: Telephone::parse(telephone)?,
            pets: Vec::new(),
        };
        owners.save(&mut owner).await?;
        seeded_owners.push(owner);
    }
    info!(count = seeded_owners.len(), "Seeded owners");

    let mut seeded_pets = Vec::with_capacity(PETS.len());
    for (name, (year, month, day), type_index, owner_index) in PETS {
        let owner_id = seeded_owners
            .get(*owner_index)
            .and_then(|o| o.id)
            .ok_or("seed data references an unknown owner")?;
        let pet_type = pet_types
            .get(*type_index)
            .ok_or("seed data references an unknown pet type")?;

        let mut pet = Pet {
            id: None,
            name: (*name).to_owned(),
            birth_date: Some(seed_date(*year, *month, *day)?),
            type_id: pet_type.id,
            pet_type: Some(pet_type.clone()),
            owner_id: Some(owner_id),
            visits: Vec::new(),
        };
        owners.save_pet(owner_id, &mut pet).await?;
        seeded_pets.push(pet);
    }
    info!(count = seeded_pets.len(), "Seeded pets");

    for (pet_index, (year, month, day), description) in VISITS {
        let pet_id = seeded_pets
            .get(*pet_index)
            .and_then(|p| p.id)
            .ok_or("seed data references an unknown pet")?;

        let mut visit = Visit::new(description);
        visit.date = seed_date(*year, *month, *day)?;
        owners.save_visit(pet_id, &mut visit).await?;
    }
    info!(count = VISITS.len(), "Seeded visits");

    info!("Database seeded with the sample clinic data");
    Ok(())
}

fn seed_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| "invalid seed date".into())
}
