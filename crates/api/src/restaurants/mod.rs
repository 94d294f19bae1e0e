//! Restaurant use cases: one request type and one handler per operation.

pub mod commands;
pub mod dto;
pub mod queries;

use sqlx::PgPool;

use crate::mediator::{Mediator, MediatorError};
use commands::{
    CreateRestaurantCommand, CreateRestaurantHandler, DeleteRestaurantCommand,
    DeleteRestaurantHandler, UpdateRestaurantCommand, UpdateRestaurantHandler,
};
use queries::{
    GetAllRestaurantsHandler, GetAllRestaurantsQuery, GetRestaurantByIdHandler,
    GetRestaurantByIdQuery,
};

/// Register every restaurant handler with `mediator`.
pub fn register_handlers(mediator: &mut Mediator, pool: &PgPool) -> Result<(), MediatorError> {
    mediator.register::<GetAllRestaurantsQuery, _>(GetAllRestaurantsHandler::new(pool.clone()))?;
    mediator.register::<GetRestaurantByIdQuery, _>(GetRestaurantByIdHandler::new(pool.clone()))?;
    mediator.register::<CreateRestaurantCommand, _>(CreateRestaurantHandler::new(pool.clone()))?;
    mediator.register::<UpdateRestaurantCommand, _>(UpdateRestaurantHandler::new(pool.clone()))?;
    mediator.register::<DeleteRestaurantCommand, _>(DeleteRestaurantHandler::new(pool.clone()))?;
    Ok(())
}

/// Build a mediator with every handler the service exposes.
pub fn build_mediator(pool: &PgPool) -> Result<Mediator, MediatorError> {
    let mut mediator = Mediator::new();
    register_handlers(&mut mediator, pool)?;
    Ok(mediator)
}
