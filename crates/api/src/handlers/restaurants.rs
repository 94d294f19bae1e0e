//! Handlers for the `/restaurants` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use restaurants_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::ListRestaurantsParams;
use crate::restaurants::commands::{
    CreateRestaurantCommand, DeleteRestaurantCommand, UpdateRestaurantCommand,
};
use crate::restaurants::queries::GetRestaurantByIdQuery;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/restaurants?searchPhrase=&pageSize=&pageNumber=&sortBy=&sortDirection=
///
/// Search, sort and page restaurants.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListRestaurantsParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query()?;
    let page = state.mediator.send(query).await?;
    Ok(Json(page))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let restaurant = state.mediator.send(GetRestaurantByIdQuery { id }).await?;
    Ok(Json(restaurant))
}

/// POST /api/restaurants
///
/// Create a restaurant with its dishes. Responds 201 with a `Location`
/// header pointing at the new resource.
pub async fn create(
    State(state): State<AppState>,
    AppJson(command): AppJson<CreateRestaurantCommand>,
) -> AppResult<impl IntoResponse> {
    command.validate()?;
    let id = state.mediator.send(command).await?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/restaurants/{id}"))],
    ))
}

/// PATCH /api/restaurants/{id}
///
/// Apply the provided fields. The route id wins over anything in the body.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(mut command): AppJson<UpdateRestaurantCommand>,
) -> AppResult<impl IntoResponse> {
    command.id = id;
    command.validate()?;
    state.mediator.send(command).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/restaurants/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.mediator.send(DeleteRestaurantCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
