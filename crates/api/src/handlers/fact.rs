//! Handlers for the `/facts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catfacts_core::types::DbId;
use catfacts_core::validation::require_non_empty;
use catfacts_db::models::fact::{CreateFact, Fact, UpdateFact};
use catfacts_db::repositories::FactRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/facts
///
/// A fact whose text already exists is rejected with 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFact>,
) -> AppResult<(StatusCode, Json<Fact>)> {
    let input = CreateFact {
        fact: require_non_empty("fact", &input.fact)?,
    };
    let fact = FactRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(fact)))
}

/// GET /api/facts
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Fact>>> {
    let facts = FactRepo::list(&state.pool).await?;
    Ok(Json(facts))
}

/// GET /api/facts/random
pub async fn random(State(state): State<AppState>) -> AppResult<Json<Fact>> {
    let fact = FactRepo::random(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No facts available".into()))?;
    Ok(Json(fact))
}

/// GET /api/facts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Fact>> {
    let fact = FactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Fact", id))?;
    Ok(Json(fact))
}

/// PUT /api/facts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFact>,
) -> AppResult<Json<Fact>> {
    let input = UpdateFact {
        fact: require_non_empty("fact", &input.fact)?,
    };
    let fact = FactRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Fact", id))?;
    Ok(Json(fact))
}

/// DELETE /api/facts/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if FactRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Fact", id))
    }
}
