//! Request handlers.
//!
//! Handlers extract and validate HTTP input, dispatch the resulting command
//! or query through the [`Mediator`](crate::mediator::Mediator) and map the
//! outcome to a status code. Errors surface as [`AppError`](crate::error::AppError).

pub mod restaurants;
