//! Idempotent starter data for a fresh database.
//!
//! Breeds, cats and developers are only inserted into empty tables, so a
//! site whose admins have already edited content is left alone. Facts are
//! upserted by text, so re-running never duplicates them.

use sqlx::SqlitePool;

use crate::models::breed::CreateBreed;
use crate::models::cat::CreateCat;
use crate::models::developer::DeveloperFields;
use crate::repositories::{BreedRepo, CatRepo, DeveloperRepo, FactRepo};

/// `(name, origin, description)` of the starter breeds.
const BREEDS: &[(&str, &str, &str)] = &[
    ("Munchkin", "Unknown", "Small legs, big personality"),
    ("Siamese", "Thailand", "Vocal and affectionate"),
    ("Maine Coon", "USA", "Large, friendly"),
];

/// `(name, breed name, age)` of the starter cats.
const CATS: &[(&str, &str, i64)] = &[
    ("Luna", "Munchkin", 2),
    ("Kai", "Siamese", 4),
    ("Munch", "Munchkin", 1),
];

/// `(name, role)` of the starter team members.
const DEVELOPERS: &[(&str, &str)] = &[("Rona", "Frontend"), ("Alex", "Backend")];

/// Built-in facts shown when nobody has added any yet.
pub const DEFAULT_FACTS: &[&str] = &[
    "Cats sleep 12-16 hours a day.",
    "A group of cats is called a clowder.",
    "Cats have five toes on their front paws, but only four on the back ones.",
    "A cat\u{2019}s nose is ridged with a unique pattern, just like a human fingerprint.",
    "Cats can jump up to six times their length.",
];

/// How many rows each table received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub breeds: usize,
    pub cats: usize,
    pub developers: usize,
    pub facts: usize,
}

/// Populate empty tables with starter content and upsert the default facts.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    if BreedRepo::count(pool).await? == 0 {
        for (name, origin, description) in BREEDS {
            BreedRepo::create(
                pool,
                &CreateBreed {
                    name: (*name).to_string(),
                    origin: Some((*origin).to_string()),
                    description: Some((*description).to_string()),
                },
            )
            .await?;
            report.breeds += 1;
        }
        tracing::info!(count = report.breeds, "Seeded breeds");
    }

    if CatRepo::count(pool).await? == 0 {
        for (name, breed_name, age) in CATS {
            let breed_id = BreedRepo::find_by_name(pool, breed_name)
                .await?
                .map(|breed| breed.id);
            CatRepo::create(
                pool,
                &CreateCat {
                    name: (*name).to_string(),
                    breed_id,
                    age: Some(*age),
                },
            )
            .await?;
            report.cats += 1;
        }
        tracing::info!(count = report.cats, "Seeded cats");
    }

    if DeveloperRepo::count(pool).await? == 0 {
        for (name, role) in DEVELOPERS {
            DeveloperRepo::create(
                pool,
                &DeveloperFields {
                    name: (*name).to_string(),
                    role: (*role).to_string(),
                    ..Default::default()
                },
            )
            .await?;
            report.developers += 1;
        }
        tracing::info!(count = report.developers, "Seeded developers");
    }

    for fact in DEFAULT_FACTS {
        if FactRepo::insert_if_absent(pool, fact).await? {
            report.facts += 1;
        }
    }
    tracing::info!(count = report.facts, "Seeded facts");

    Ok(report)
}
