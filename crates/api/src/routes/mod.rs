pub mod health;
pub mod restaurants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /restaurants                 list, create
/// /restaurants/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/restaurants", restaurants::router())
}
