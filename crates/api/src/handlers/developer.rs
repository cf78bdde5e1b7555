//! Handlers for the `/developers` resource.
//!
//! Create and update take `multipart/form-data` so image files can travel
//! with the text fields; the work itself is done by
//! [`DeveloperService`](crate::services::developer::DeveloperService).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use catfacts_core::types::DbId;
use catfacts_db::models::developer::Developer;

use crate::error::AppResult;
use crate::multipart::DeveloperForm;
use crate::state::AppState;

/// GET /api/developers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Developer>>> {
    let developers = state.developers.list().await?;
    Ok(Json(developers))
}

/// GET /api/developers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Developer>> {
    let developer = state.developers.get(id).await?;
    Ok(Json(developer))
}

/// POST /api/developers
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Developer>)> {
    let (input, uploads) = DeveloperForm::read(multipart).await?.into_create();
    let developer = state.developers.create(input, uploads).await?;
    Ok((StatusCode::CREATED, Json(developer)))
}

/// PUT /api/developers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Developer>> {
    let (input, uploads) = DeveloperForm::read(multipart).await?.into_update();
    let developer = state.developers.update(id, input, uploads).await?;
    Ok(Json(developer))
}

/// DELETE /api/developers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.developers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
