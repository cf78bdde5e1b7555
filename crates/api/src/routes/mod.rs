pub mod breed;
pub mod cat;
pub mod developer;
pub mod fact;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /developers                  list, create (multipart)
/// /developers/{id}             get, update (multipart), delete
///
/// /breeds                      list, create
/// /breeds/{id}                 get, update, delete
///
/// /cats                        list (joined with breed), create
/// /cats/{id}                   get, update, delete
///
/// /facts                       list, create
/// /facts/random                one random fact
/// /facts/{id}                  get, update, delete
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/developers", developer::router(max_upload_bytes))
        .nest("/breeds", breed::router())
        .nest("/cats", cat::router())
        .nest("/facts", fact::router())
}
