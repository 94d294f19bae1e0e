//! Repository for the `restaurants` table.
//!
//! Every read returns [`RestaurantWithDishes`]: dishes are loaded with a
//! second query on the same connection, so a caller holding a transaction
//! sees a consistent aggregate.

use std::collections::HashMap;

use sqlx::PgConnection;
use restaurants_core::paging::page_offset;
use restaurants_core::types::DbId;

use crate::models::dish::Dish;
use crate::models::restaurant::{
    NewRestaurant, Restaurant, RestaurantFilter, RestaurantWithDishes,
};
use crate::repositories::DishRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, category, has_delivery, contact_email, \
    contact_number, city, street, postal_code, created_at, updated_at";

/// Matches rows whose name or description contains the bound pattern.
/// A NULL pattern disables the filter.
const SEARCH_CLAUSE: &str = "($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)";

/// Provides CRUD and search operations for restaurants.
pub struct RestaurantRepo;

impl RestaurantRepo {
    /// Insert a restaurant, returning the generated id.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewRestaurant,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO restaurants \
                (name, description, category, has_delivery, contact_email, \
                 contact_number, city, street, postal_code) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.has_delivery)
        .bind(input.contact_email.as_deref())
        .bind(input.contact_number.as_deref())
        .bind(input.city.as_deref())
        .bind(input.street.as_deref())
        .bind(input.postal_code.as_deref())
        .fetch_one(conn)
        .await
    }

    /// Find a restaurant and its dishes by id.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<RestaurantWithDishes>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurants WHERE id = $1");
        let Some(restaurant) = sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let dishes = DishRepo::list_for_restaurants(&mut *conn, &[id]).await?;
        Ok(Some(RestaurantWithDishes { restaurant, dishes }))
    }

    /// List every restaurant with its dishes, ordered by name.
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<RestaurantWithDishes>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurants ORDER BY name, id");
        let restaurants = sqlx::query_as::<_, Restaurant>(&query)
            .fetch_all(&mut *conn)
            .await?;
        Self::with_dishes(conn, restaurants).await
    }

    /// Search, sort and page restaurants.
    ///
    /// Returns the requested page together with the number of rows matching
    /// the search phrase before paging. Rows tie-break on `id` so that
    /// consecutive pages never overlap.
    pub async fn list_matching(
        conn: &mut PgConnection,
        filter: &RestaurantFilter,
    ) -> Result<(Vec<RestaurantWithDishes>, i64), sqlx::Error> {
        let pattern = filter.search_phrase.as_deref().and_then(search_pattern);

        let count_query = format!("SELECT COUNT(*) FROM restaurants WHERE {SEARCH_CLAUSE}");
        let total_count = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(pattern.as_deref())
            .fetch_one(&mut *conn)
            .await?;

        let order_clause = match filter.sort_by {
            Some(sort_by) => format!(
                "{} {}, id",
                sort_by.column(),
                filter.sort_direction.as_sql()
            ),
            None => "id".to_string(),
        };

        let query = format!(
            "SELECT {COLUMNS} FROM restaurants \
             WHERE {SEARCH_CLAUSE} \
             ORDER BY {order_clause} \
             LIMIT $2 OFFSET $3"
        );
        let restaurants = sqlx::query_as::<_, Restaurant>(&query)
            .bind(pattern.as_deref())
            .bind(filter.page_size)
            .bind(page_offset(filter.page_size, filter.page_number))
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(
            total_count,
            returned = restaurants.len(),
            page_number = filter.page_number,
            page_size = filter.page_size,
            "Listed matching restaurants",
        );

        let page = Self::with_dishes(conn, restaurants).await?;
        Ok((page, total_count))
    }

    /// Persist the current field values of a loaded restaurant.
    ///
    /// Returns `false` if the row no longer exists.
    pub async fn save_changes(
        conn: &mut PgConnection,
        restaurant: &Restaurant,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE restaurants SET \
                name = $2, \
                description = $3, \
                category = $4, \
                has_delivery = $5, \
                contact_email = $6, \
                contact_number = $7, \
                city = $8, \
                street = $9, \
                postal_code = $10, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.category)
        .bind(restaurant.has_delivery)
        .bind(restaurant.contact_email.as_deref())
        .bind(restaurant.contact_number.as_deref())
        .bind(restaurant.city.as_deref())
        .bind(restaurant.street.as_deref())
        .bind(restaurant.postal_code.as_deref())
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a restaurant; its dishes go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach dishes to each restaurant, preserving the restaurant order.
    async fn with_dishes(
        conn: &mut PgConnection,
        restaurants: Vec<Restaurant>,
    ) -> Result<Vec<RestaurantWithDishes>, sqlx::Error> {
        let ids: Vec<DbId> = restaurants.iter().map(|r| r.id).collect();
        let dishes = DishRepo::list_for_restaurants(conn, &ids).await?;
        Ok(group_dishes(restaurants, dishes))
    }
}

/// Turn a search phrase into an `ILIKE` substring pattern.
///
/// Blank phrases yield `None` (no filtering). `%`, `_` and `\` inside the
/// phrase are escaped so they match literally.
fn search_pattern(phrase: &str) -> Option<String> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

fn group_dishes(restaurants: Vec<Restaurant>, dishes: Vec<Dish>) -> Vec<RestaurantWithDishes> {
    let mut by_restaurant: HashMap<DbId, Vec<Dish>> = HashMap::new();
    for dish in dishes {
        by_restaurant.entry(dish.restaurant_id).or_default().push(dish);
    }

    restaurants
        .into_iter()
        .map(|restaurant| {
            let dishes = by_restaurant.remove(&restaurant.id).unwrap_or_default();
            RestaurantWithDishes { restaurant, dishes }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_phrase_disables_search() {
        assert_eq!(search_pattern(""), None);
        assert_eq!(search_pattern("   "), None);
    }

    #[test]
    fn phrase_becomes_substring_pattern() {
        assert_eq!(search_pattern(" pizza "), Some("%pizza%".to_string()));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(search_pattern("100%"), Some("%100\\%%".to_string()));
        assert_eq!(search_pattern("a_b"), Some("%a\\_b%".to_string()));
        assert_eq!(search_pattern("c\\d"), Some("%c\\\\d%".to_string()));
    }

    fn restaurant(name: &str) -> Restaurant {
        Restaurant {
            id: DbId::new_v4(),
            name: name.to_string(),
            description: String::new(),
            category: "Italian".to_string(),
            has_delivery: false,
            contact_email: None,
            contact_number: None,
            city: None,
            street: None,
            postal_code: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn dish(restaurant_id: DbId, name: &str) -> Dish {
        Dish {
            id: DbId::new_v4(),
            restaurant_id,
            name: name.to_string(),
            description: String::new(),
            price_cents: 100,
            kilo_calories: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn dishes_are_grouped_under_their_owner() {
        let a = restaurant("A");
        let b = restaurant("B");
        let c = restaurant("C");
        let dishes = vec![dish(b.id, "b1"), dish(a.id, "a1"), dish(b.id, "b2")];

        let grouped = group_dishes(vec![a.clone(), b.clone(), c.clone()], dishes);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].restaurant.id, a.id);
        assert_eq!(grouped[0].dishes.len(), 1);
        assert_eq!(grouped[1].restaurant.id, b.id);
        let names: Vec<&str> = grouped[1].dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["b1", "b2"]);
        assert!(grouped[2].dishes.is_empty());
    }
}
