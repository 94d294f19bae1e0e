//! Dish entity model.
//!
//! Dishes have no lifecycle of their own: they are inserted and deleted in
//! the context of the restaurant that owns them.

use serde::Serialize;
use sqlx::FromRow;
use restaurants_core::types::{DbId, Timestamp};

/// A row from the `dishes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dish {
    pub id: DbId,
    pub restaurant_id: DbId,
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price_cents: i64,
    pub kilo_calories: Option<i32>,
    pub created_at: Timestamp,
}

/// Values for inserting a dish under an existing restaurant.
#[derive(Debug, Clone)]
pub struct NewDish {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub kilo_calories: Option<i32>,
}
