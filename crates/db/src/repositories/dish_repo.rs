//! Repository for the `dishes` table.

use sqlx::PgConnection;
use restaurants_core::types::DbId;

use crate::models::dish::{Dish, NewDish};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, restaurant_id, name, description, price_cents, kilo_calories, created_at";

/// Provides insert, bulk delete and eager-load queries for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Insert a dish owned by `restaurant_id`, returning the generated id.
    pub async fn create(
        conn: &mut PgConnection,
        restaurant_id: DbId,
        input: &NewDish,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO dishes (restaurant_id, name, description, price_cents, kilo_calories) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(restaurant_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price_cents)
        .bind(input.kilo_calories)
        .fetch_one(conn)
        .await
    }

    /// Delete every dish whose id is in `ids`. Returns the number of rows removed.
    pub async fn delete_many(conn: &mut PgConnection, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM dishes WHERE id = ANY($1)")
            .bind(ids)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Load the dishes of several restaurants at once, ordered by name.
    pub async fn list_for_restaurants(
        conn: &mut PgConnection,
        restaurant_ids: &[DbId],
    ) -> Result<Vec<Dish>, sqlx::Error> {
        if restaurant_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM dishes \
             WHERE restaurant_id = ANY($1) \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(restaurant_ids)
            .fetch_all(conn)
            .await
    }
}
