//! Restaurants API server library.
//!
//! Exposes the building blocks (config, state, error handling, mediator,
//! use-case handlers, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mediator;
pub mod query;
pub mod restaurants;
pub mod router;
pub mod routes;
pub mod state;
