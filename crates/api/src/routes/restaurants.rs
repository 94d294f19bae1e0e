//! Route definitions for restaurants.

use axum::routing::get;
use axum::Router;

use crate::handlers::restaurants;
use crate::state::AppState;

/// Routes mounted at `/restaurants`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(restaurants::list).post(restaurants::create))
        .route(
            "/{id}",
            get(restaurants::get_by_id)
                .patch(restaurants::update)
                .delete(restaurants::delete),
        )
}
