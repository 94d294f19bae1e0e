//! Read-side requests: paged listing and fetch by id.

use async_trait::async_trait;
use sqlx::PgPool;
use restaurants_core::error::CoreError;
use restaurants_core::paging::{PagedResult, SortBy, SortDirection};
use restaurants_core::restaurant::RESTAURANT_ENTITY;
use restaurants_core::types::DbId;
use restaurants_db::models::restaurant::RestaurantFilter;
use restaurants_db::repositories::RestaurantRepo;

use crate::error::AppResult;
use crate::mediator::{Request, RequestHandler};
use crate::restaurants::dto::RestaurantDto;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Search, sort and page restaurants.
///
/// Built from query-string parameters by
/// [`ListRestaurantsParams::into_query`](crate::query::ListRestaurantsParams::into_query),
/// which guarantees `page_size` and `page_number` are in range.
#[derive(Debug, Clone, PartialEq)]
pub struct GetAllRestaurantsQuery {
    pub search_phrase: Option<String>,
    pub page_size: i64,
    pub page_number: i64,
    pub sort_by: Option<SortBy>,
    pub sort_direction: SortDirection,
}

impl Request for GetAllRestaurantsQuery {
    type Response = PagedResult<RestaurantDto>;
    const NAME: &'static str = "GetAllRestaurantsQuery";
}

pub struct GetAllRestaurantsHandler {
    pool: PgPool,
}

impl GetAllRestaurantsHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestHandler<GetAllRestaurantsQuery> for GetAllRestaurantsHandler {
    async fn handle(&self, query: GetAllRestaurantsQuery) -> AppResult<PagedResult<RestaurantDto>> {
        let GetAllRestaurantsQuery {
            search_phrase,
            page_size,
            page_number,
            sort_by,
            sort_direction,
        } = query;

        let filter = RestaurantFilter {
            search_phrase,
            page_size,
            page_number,
            sort_by,
            sort_direction,
        };

        let mut conn = self.pool.acquire().await?;
        let (restaurants, total_count) = RestaurantRepo::list_matching(&mut conn, &filter).await?;

        Ok(PagedResult::new(restaurants, total_count, page_size, page_number)
            .map(RestaurantDto::from))
    }
}

// ---------------------------------------------------------------------------
// Get by id
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetRestaurantByIdQuery {
    pub id: DbId,
}

impl Request for GetRestaurantByIdQuery {
    type Response = RestaurantDto;
    const NAME: &'static str = "GetRestaurantByIdQuery";
}

pub struct GetRestaurantByIdHandler {
    pool: PgPool,
}

impl GetRestaurantByIdHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestHandler<GetRestaurantByIdQuery> for GetRestaurantByIdHandler {
    async fn handle(&self, query: GetRestaurantByIdQuery) -> AppResult<RestaurantDto> {
        let mut conn = self.pool.acquire().await?;
        let restaurant = RestaurantRepo::find_by_id(&mut conn, query.id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: RESTAURANT_ENTITY,
                id: query.id,
            })?;
        Ok(RestaurantDto::from(restaurant))
    }
}
