//! Repository-level tests for breeds, cats, facts and seeding.

use catfacts_core::patch::Patch;
use catfacts_db::models::breed::{CreateBreed, UpdateBreed};
use catfacts_db::models::cat::{CreateCat, UpdateCat};
use catfacts_db::models::fact::{CreateFact, UpdateFact};
use catfacts_db::repositories::{BreedRepo, CatRepo, DeveloperRepo, FactRepo};
use catfacts_db::seed::{seed_defaults, DEFAULT_FACTS};
use sqlx::SqlitePool;

async fn breed(pool: &SqlitePool, name: &str) -> i64 {
    BreedRepo::create(
        pool,
        &CreateBreed {
            name: name.to_string(),
            origin: None,
            description: Some(format!("{name} description")),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn breed_partial_update_keeps_other_fields(pool: SqlitePool) {
    let id = breed(&pool, "Siamese").await;

    let updated = BreedRepo::update(
        &pool,
        id,
        &UpdateBreed {
            origin: Patch::Set(Some("Thailand".into())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Siamese");
    assert_eq!(updated.origin.as_deref(), Some("Thailand"));
    assert_eq!(updated.description.as_deref(), Some("Siamese description"));
}

#[sqlx::test(migrations = "./migrations")]
async fn cat_listing_joins_breed_fields(pool: SqlitePool) {
    let breed_id = breed(&pool, "Munchkin").await;
    CatRepo::create(
        &pool,
        &CreateCat {
            name: "Luna".into(),
            breed_id: Some(breed_id),
            age: Some(2),
        },
    )
    .await
    .unwrap();
    CatRepo::create(
        &pool,
        &CreateCat {
            name: "Stray".into(),
            breed_id: None,
            age: None,
        },
    )
    .await
    .unwrap();

    let cats = CatRepo::list_with_breed(&pool).await.unwrap();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0].breed_name.as_deref(), Some("Munchkin"));
    assert_eq!(cats[0].breed_description.as_deref(), Some("Munchkin description"));
    assert!(cats[1].breed_name.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_breed_nulls_cat_breed(pool: SqlitePool) {
    let breed_id = breed(&pool, "Maine Coon").await;
    let cat = CatRepo::create(
        &pool,
        &CreateCat {
            name: "Big".into(),
            breed_id: Some(breed_id),
            age: Some(5),
        },
    )
    .await
    .unwrap();

    assert!(BreedRepo::delete(&pool, breed_id).await.unwrap());

    let cat = CatRepo::find_by_id(&pool, cat.id).await.unwrap().unwrap();
    assert!(cat.breed_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn cat_update_with_unknown_breed_is_rejected(pool: SqlitePool) {
    let cat = CatRepo::create(
        &pool,
        &CreateCat {
            name: "Kai".into(),
            breed_id: None,
            age: Some(4),
        },
    )
    .await
    .unwrap();

    let err = CatRepo::update(
        &pool,
        cat.id,
        &UpdateCat {
            breed_id: Patch::Set(Some(999)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert!(db_err.is_foreign_key_violation());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_fact_is_unique_violation(pool: SqlitePool) {
    let input = CreateFact {
        fact: "Cats purr.".into(),
    };
    FactRepo::create(&pool, &input).await.unwrap();

    let err = FactRepo::create(&pool, &input).await.unwrap_err();
    assert!(err.as_database_error().unwrap().is_unique_violation());
}

#[sqlx::test(migrations = "./migrations")]
async fn fact_update_and_random(pool: SqlitePool) {
    assert!(FactRepo::random(&pool).await.unwrap().is_none());

    let fact = FactRepo::create(
        &pool,
        &CreateFact {
            fact: "Old".into(),
        },
    )
    .await
    .unwrap();
    let updated = FactRepo::update(
        &pool,
        fact.id,
        &UpdateFact {
            fact: "New".into(),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.fact, "New");

    let random = FactRepo::random(&pool).await.unwrap().unwrap();
    assert_eq!(random.id, fact.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn seeding_is_idempotent(pool: SqlitePool) {
    let first = seed_defaults(&pool).await.unwrap();
    assert_eq!(first.breeds, 3);
    assert_eq!(first.cats, 3);
    assert_eq!(first.developers, 2);
    assert_eq!(first.facts, DEFAULT_FACTS.len());

    let second = seed_defaults(&pool).await.unwrap();
    assert_eq!(second, Default::default());

    assert_eq!(DeveloperRepo::count(&pool).await.unwrap(), 2);
    assert_eq!(FactRepo::list(&pool).await.unwrap().len(), DEFAULT_FACTS.len());

    let cats = CatRepo::list_with_breed(&pool).await.unwrap();
    assert_eq!(cats[0].name, "Luna");
    assert_eq!(cats[0].breed_name.as_deref(), Some("Munchkin"));
}

#[sqlx::test(migrations = "./migrations")]
async fn explicit_none_clears_nullable_columns(pool: SqlitePool) {
    let breed_id = breed(&pool, "Maine Coon").await;
    let cat = CatRepo::create(
        &pool,
        &CreateCat {
            name: "Munch".into(),
            breed_id: Some(breed_id),
            age: Some(1),
        },
    )
    .await
    .unwrap();

    let cleared = CatRepo::update(
        &pool,
        cat.id,
        &UpdateCat {
            breed_id: Patch::Set(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.breed_id, None);
    assert_eq!(cleared.age, Some(1));

    let breed = BreedRepo::update(
        &pool,
        breed_id,
        &UpdateBreed {
            description: Patch::Set(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(breed.description, None);
    assert_eq!(breed.name, "Maine Coon");
}
