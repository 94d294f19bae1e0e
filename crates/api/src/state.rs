use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mediator::Mediator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: restaurants_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Routes commands and queries to their registered handler.
    pub mediator: Arc<Mediator>,
}
