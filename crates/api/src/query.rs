//! Query-string parameter types for API handlers.
//!
//! Raw parameters are deserialized leniently and then converted into typed
//! requests, so range and enum checks produce the same `VALIDATION_ERROR`
//! body as body validation.

use serde::Deserialize;
use restaurants_core::error::CoreError;
use restaurants_core::paging::{
    checked_page_offset, SortBy, SortDirection, DEFAULT_PAGE_SIZE, FIRST_PAGE, MAX_PAGE_SIZE,
};

use crate::restaurants::queries::GetAllRestaurantsQuery;

/// Parameters for `GET /api/restaurants`
/// (`?searchPhrase=&pageSize=&pageNumber=&sortBy=&sortDirection=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRestaurantsParams {
    pub search_phrase: Option<String>,
    pub page_size: Option<i64>,
    pub page_number: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl ListRestaurantsParams {
    /// Apply defaults and reject out-of-range paging or unknown sort values.
    pub fn into_query(self) -> Result<GetAllRestaurantsQuery, CoreError> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(CoreError::Validation(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let page_number = self.page_number.unwrap_or(FIRST_PAGE);
        if page_number < FIRST_PAGE {
            return Err(CoreError::Validation(format!(
                "pageNumber must be at least {FIRST_PAGE}, got {page_number}"
            )));
        }

        if checked_page_offset(page_size, page_number).is_none() {
            return Err(CoreError::Validation(format!(
                "pageNumber {page_number} is too large for pageSize {page_size}"
            )));
        }

        let sort_by = match non_blank(self.sort_by) {
            Some(raw) => Some(raw.parse::<SortBy>()?),
            None => None,
        };
        let sort_direction = match non_blank(self.sort_direction) {
            Some(raw) => raw.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };

        Ok(GetAllRestaurantsQuery {
            search_phrase: non_blank(self.search_phrase),
            page_size,
            page_number,
            sort_by,
            sort_direction,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let query = ListRestaurantsParams::default().into_query().unwrap();
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(query.page_number, FIRST_PAGE);
        assert_eq!(query.sort_by, None);
        assert_eq!(query.sort_direction, SortDirection::Ascending);
        assert_eq!(query.search_phrase, None);
    }

    #[test]
    fn sort_values_parse_case_insensitively() {
        let query = ListRestaurantsParams {
            sort_by: Some("category".into()),
            sort_direction: Some("DESC".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.sort_by, Some(SortBy::Category));
        assert_eq!(query.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn blank_values_count_as_absent() {
        let query = ListRestaurantsParams {
            search_phrase: Some("   ".into()),
            sort_by: Some("".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.search_phrase, None);
        assert_eq!(query.sort_by, None);
    }

    #[test]
    fn page_number_zero_is_rejected() {
        let err = ListRestaurantsParams {
            page_number: Some(0),
            ..Default::default()
        }
        .into_query()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("pageNumber"));
    }

    #[test]
    fn page_size_outside_range_is_rejected() {
        for size in [0, -3, MAX_PAGE_SIZE + 1] {
            let err = ListRestaurantsParams {
                page_size: Some(size),
                ..Default::default()
            }
            .into_query()
            .unwrap_err();
            assert_matches!(err, CoreError::Validation(msg) if msg.contains("pageSize"));
        }
    }

    #[test]
    fn page_number_whose_offset_overflows_is_rejected() {
        let err = ListRestaurantsParams {
            page_size: Some(MAX_PAGE_SIZE),
            page_number: Some(i64::MAX / 10),
            ..Default::default()
        }
        .into_query()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("pageNumber"));
    }

    #[test]
    fn largest_representable_page_is_accepted() {
        let query = ListRestaurantsParams {
            page_size: Some(1),
            page_number: Some(i64::MAX),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.page_number, i64::MAX);
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let err = ListRestaurantsParams {
            sort_by: Some("Rating".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Rating"));
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let params: ListRestaurantsParams = serde_json::from_value(serde_json::json!({
            "searchPhrase": "sushi",
            "pageSize": 5,
            "pageNumber": 2,
        }))
        .unwrap();
        let query = params.into_query().unwrap();
        assert_eq!(query.search_phrase.as_deref(), Some("sushi"));
        assert_eq!(query.page_size, 5);
        assert_eq!(query.page_number, 2);
    }
}
