//! Restaurant entity model, the eager-loaded aggregate and list filter.

use serde::Serialize;
use sqlx::FromRow;
use restaurants_core::paging::{SortBy, SortDirection};
use restaurants_core::types::{DbId, Timestamp};

use crate::models::dish::Dish;

/// A row from the `restaurants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub has_delivery: bool,
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A restaurant together with every dish it owns.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantWithDishes {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub dishes: Vec<Dish>,
}

/// Values for inserting a restaurant. Dishes are inserted separately.
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub description: String,
    pub category: String,
    pub has_delivery: bool,
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

/// Search, sort and page parameters for [`RestaurantRepo::list_matching`].
///
/// `page_size` and `page_number` must both be at least 1; the API layer
/// rejects anything else before a filter is built.
///
/// [`RestaurantRepo::list_matching`]: crate::repositories::RestaurantRepo::list_matching
#[derive(Debug, Clone)]
pub struct RestaurantFilter {
    pub search_phrase: Option<String>,
    pub page_size: i64,
    pub page_number: i64,
    pub sort_by: Option<SortBy>,
    pub sort_direction: SortDirection,
}
