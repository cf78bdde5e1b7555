//! Route definitions for the `/facts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::fact;
use crate::state::AppState;

/// Routes mounted at `/facts`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /random    -> random
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fact::list).post(fact::create))
        .route("/random", get(fact::random))
        .route(
            "/{id}",
            get(fact::get_by_id).put(fact::update).delete(fact::delete),
        )
}
