//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&mut PgConnection` as the first argument. Callers decide the unit of
//! work: a pooled connection for reads, a transaction for writes.

pub mod dish_repo;
pub mod restaurant_repo;

pub use dish_repo::DishRepo;
pub use restaurant_repo::RestaurantRepo;
