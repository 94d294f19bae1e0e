//! Write-side requests: create, update and delete.
//!
//! Each command runs in its own transaction. The update replaces dishes and
//! fields together, so a failure at any step leaves the restaurant untouched.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use sqlx::PgPool;
use validator::{Validate, ValidateEmail, ValidationError};
use restaurants_core::error::CoreError;
use restaurants_core::restaurant::{
    canonical_category, validate_category, validate_postal_code, RESTAURANT_ENTITY,
};
use restaurants_core::types::DbId;
use restaurants_db::models::dish::NewDish;
use restaurants_db::models::restaurant::{NewRestaurant, Restaurant};
use restaurants_db::repositories::{DishRepo, RestaurantRepo};

use crate::error::AppResult;
use crate::mediator::{Request, RequestHandler};

/// Store categories in their canonical spelling; unknown input is kept as-is
/// (validation rejects it before a command reaches a handler).
fn category_for_storage(input: &str) -> String {
    canonical_category(input).unwrap_or(input).to_string()
}

// ---------------------------------------------------------------------------
// Dish input
// ---------------------------------------------------------------------------

/// A dish supplied inside a create or update body. `price` is in minor units.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DishInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub kilo_calories: Option<i32>,
}

impl From<&DishInput> for NewDish {
    fn from(input: &DishInput) -> Self {
        NewDish {
            name: input.name.clone(),
            description: input.description.clone(),
            price_cents: input.price,
            kilo_calories: input.kilo_calories,
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantCommand {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[serde(default)]
    pub has_delivery: bool,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub dishes: Vec<DishInput>,
}

impl Request for CreateRestaurantCommand {
    type Response = DbId;
    const NAME: &'static str = "CreateRestaurantCommand";
}

impl From<&CreateRestaurantCommand> for NewRestaurant {
    fn from(command: &CreateRestaurantCommand) -> Self {
        NewRestaurant {
            name: command.name.trim().to_string(),
            description: command.description.clone(),
            category: category_for_storage(&command.category),
            has_delivery: command.has_delivery,
            contact_email: command.contact_email.clone(),
            contact_number: command.contact_number.clone(),
            city: command.city.clone(),
            street: command.street.clone(),
            postal_code: command.postal_code.clone(),
        }
    }
}

pub struct CreateRestaurantHandler {
    pool: PgPool,
}

impl CreateRestaurantHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestHandler<CreateRestaurantCommand> for CreateRestaurantHandler {
    async fn handle(&self, command: CreateRestaurantCommand) -> AppResult<DbId> {
        let mut tx = self.pool.begin().await?;

        let id = RestaurantRepo::create(&mut tx, &NewRestaurant::from(&command)).await?;
        for dish in &command.dishes {
            DishRepo::create(&mut tx, id, &NewDish::from(dish)).await?;
        }

        tx.commit().await?;
        tracing::info!(restaurant_id = %id, dishes = command.dishes.len(), "Restaurant created");
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Keep `null` distinct from an absent key: absent stays `None` (via
/// `#[serde(default)]`), `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update. Absent fields are left unchanged; a present `dishes` list
/// replaces every dish the restaurant owns. The optional contact and address
/// fields are cleared by sending `null`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_clearable_fields"))]
pub struct UpdateRestaurantCommand {
    /// Taken from the route, never from the body.
    #[serde(skip)]
    pub id: DbId,
    #[validate(length(min = 3, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,
    pub has_delivery: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub street: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub postal_code: Option<Option<String>>,
    #[validate(nested)]
    pub dishes: Option<Vec<DishInput>>,
}

/// Format checks for the clearable fields; only non-null values are checked.
fn validate_clearable_fields(command: &UpdateRestaurantCommand) -> Result<(), ValidationError> {
    if let Some(Some(email)) = &command.contact_email {
        if !email.validate_email() {
            let mut err = ValidationError::new("email");
            err.message = Some("contactEmail must be a valid email address".into());
            return Err(err);
        }
    }
    if let Some(Some(postal_code)) = &command.postal_code {
        validate_postal_code(postal_code)?;
    }
    Ok(())
}

impl Request for UpdateRestaurantCommand {
    type Response = ();
    const NAME: &'static str = "UpdateRestaurantCommand";
}

impl UpdateRestaurantCommand {
    /// Copy every provided field onto `restaurant`.
    fn apply_to(&self, restaurant: &mut Restaurant) {
        if let Some(name) = &self.name {
            restaurant.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            restaurant.description = description.clone();
        }
        if let Some(category) = &self.category {
            restaurant.category = category_for_storage(category);
        }
        if let Some(has_delivery) = self.has_delivery {
            restaurant.has_delivery = has_delivery;
        }
        if let Some(email) = &self.contact_email {
            restaurant.contact_email = email.clone();
        }
        if let Some(number) = &self.contact_number {
            restaurant.contact_number = number.clone();
        }
        if let Some(city) = &self.city {
            restaurant.city = city.clone();
        }
        if let Some(street) = &self.street {
            restaurant.street = street.clone();
        }
        if let Some(postal_code) = &self.postal_code {
            restaurant.postal_code = postal_code.clone();
        }
    }
}

pub struct UpdateRestaurantHandler {
    pool: PgPool,
}

impl UpdateRestaurantHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestHandler<UpdateRestaurantCommand> for UpdateRestaurantHandler {
    async fn handle(&self, command: UpdateRestaurantCommand) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let mut loaded = RestaurantRepo::find_by_id(&mut tx, command.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: RESTAURANT_ENTITY,
                id: command.id,
            })?;

        command.apply_to(&mut loaded.restaurant);

        if let Some(dishes) = &command.dishes {
            let old_ids: Vec<DbId> = loaded.dishes.iter().map(|d| d.id).collect();
            let removed = DishRepo::delete_many(&mut tx, &old_ids).await?;
            for dish in dishes {
                DishRepo::create(&mut tx, command.id, &NewDish::from(dish)).await?;
            }
            tracing::debug!(
                restaurant_id = %command.id,
                removed,
                added = dishes.len(),
                "Replaced restaurant dishes",
            );
        }

        // The row can vanish between load and save if a delete commits first.
        if !RestaurantRepo::save_changes(&mut tx, &loaded.restaurant).await? {
            return Err(CoreError::NotFound {
                entity: RESTAURANT_ENTITY,
                id: command.id,
            }
            .into());
        }
        tx.commit().await?;

        tracing::info!(restaurant_id = %command.id, "Restaurant updated");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRestaurantCommand {
    pub id: DbId,
}

impl Request for DeleteRestaurantCommand {
    type Response = ();
    const NAME: &'static str = "DeleteRestaurantCommand";
}

pub struct DeleteRestaurantHandler {
    pool: PgPool,
}

impl DeleteRestaurantHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestHandler<DeleteRestaurantCommand> for DeleteRestaurantHandler {
    async fn handle(&self, command: DeleteRestaurantCommand) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let loaded = RestaurantRepo::find_by_id(&mut tx, command.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: RESTAURANT_ENTITY,
                id: command.id,
            })?;

        RestaurantRepo::delete(&mut tx, command.id).await?;
        tx.commit().await?;

        tracing::info!(
            restaurant_id = %command.id,
            dishes = loaded.dishes.len(),
            "Restaurant deleted",
        );
        Ok(())
    }
}
