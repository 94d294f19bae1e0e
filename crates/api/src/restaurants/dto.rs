//! Transfer objects returned across the API boundary.

use serde::Serialize;
use restaurants_core::types::DbId;
use restaurants_db::models::dish::Dish;
use restaurants_db::models::restaurant::RestaurantWithDishes;

/// A dish as returned to clients. `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishDto {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub kilo_calories: Option<i32>,
}

/// A restaurant with its dishes and flattened address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDto {
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
    pub dishes: Vec<DishDto>,
}

impl From<Dish> for DishDto {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            price: dish.price_cents,
            kilo_calories: dish.kilo_calories,
        }
    }
}

impl From<RestaurantWithDishes> for RestaurantDto {
    fn from(value: RestaurantWithDishes) -> Self {
        let RestaurantWithDishes { restaurant, dishes } = value;
        Self {
            id: restaurant.id,
            name: restaurant.name,
            description: restaurant.description,
            category: restaurant.category,
            has_delivery: restaurant.has_delivery,
            contact_email: restaurant.contact_email,
            contact_number: restaurant.contact_number,
            city: restaurant.city,
            street: restaurant.street,
            postal_code: restaurant.postal_code,
            dishes: dishes.into_iter().map(DishDto::from).collect(),
        }
    }
}
