//! Handlers for the `/breeds` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catfacts_core::types::DbId;
use catfacts_core::validation::require_non_empty;
use catfacts_db::models::breed::{Breed, CreateBreed, UpdateBreed};
use catfacts_db::repositories::BreedRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/breeds
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBreed>,
) -> AppResult<(StatusCode, Json<Breed>)> {
    let input = CreateBreed {
        name: require_non_empty("name", &input.name)?,
        ..input
    };
    let breed = BreedRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(breed)))
}

/// GET /api/breeds
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Breed>>> {
    let breeds = BreedRepo::list(&state.pool).await?;
    Ok(Json(breeds))
}

/// GET /api/breeds/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Breed>> {
    let breed = BreedRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Breed", id))?;
    Ok(Json(breed))
}

/// PUT /api/breeds/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBreed>,
) -> AppResult<Json<Breed>> {
    let input = UpdateBreed {
        name: input
            .name
            .map(|name| require_non_empty("name", &name))
            .transpose()?,
        ..input
    };
    let breed = BreedRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Breed", id))?;
    Ok(Json(breed))
}

/// DELETE /api/breeds/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BreedRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Breed", id))
    }
}
