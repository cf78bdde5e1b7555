//! Handlers for the `/cats` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catfacts_core::error::CoreError;
use catfacts_core::types::DbId;
use catfacts_core::validation::{require_non_empty, require_non_negative};
use catfacts_db::models::cat::{Cat, CatWithBreed, CreateCat, UpdateCat};
use catfacts_db::repositories::{BreedRepo, CatRepo};
use catfacts_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reject a `breed_id` that names no breed, before the foreign key does.
async fn ensure_breed_exists(pool: &DbPool, breed_id: Option<DbId>) -> AppResult<()> {
    let Some(breed_id) = breed_id else {
        return Ok(());
    };
    if BreedRepo::find_by_id(pool, breed_id).await?.is_none() {
        return Err(CoreError::Validation(format!("breed_id {breed_id} does not exist")).into());
    }
    Ok(())
}

/// POST /api/cats
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCat>,
) -> AppResult<(StatusCode, Json<Cat>)> {
    require_non_negative("age", input.age)?;
    let input = CreateCat {
        name: require_non_empty("name", &input.name)?,
        ..input
    };
    ensure_breed_exists(&state.pool, input.breed_id).await?;

    let cat = CatRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(cat)))
}

/// GET /api/cats
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CatWithBreed>>> {
    let cats = CatRepo::list_with_breed(&state.pool).await?;
    Ok(Json(cats))
}

/// GET /api/cats/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Cat>> {
    let cat = CatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Cat", id))?;
    Ok(Json(cat))
}

/// PUT /api/cats/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCat>,
) -> AppResult<Json<Cat>> {
    require_non_negative("age", input.age.as_set().copied().flatten())?;
    let input = UpdateCat {
        name: input
            .name
            .map(|name| require_non_empty("name", &name))
            .transpose()?,
        ..input
    };
    ensure_breed_exists(&state.pool, input.breed_id.as_set().copied().flatten()).await?;

    let cat = CatRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Cat", id))?;
    Ok(Json(cat))
}

/// DELETE /api/cats/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CatRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Cat", id))
    }
}
