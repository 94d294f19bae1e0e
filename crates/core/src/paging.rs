//! Sorting and pagination value types for list queries.
//!
//! Sort columns form a closed set: anything a client sends is parsed into
//! [`SortBy`] at the HTTP boundary, so the repository never sees an unknown
//! column name.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults and bounds
// ---------------------------------------------------------------------------

/// Page size used when the client does not send `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page numbers are 1-based.
pub const FIRST_PAGE: i64 = 1;

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

/// Direction applied to the selected sort column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    /// Accepts `Ascending`/`Descending` (any case) and the `asc`/`desc` short forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(CoreError::Validation(format!(
                "sortDirection must be Ascending or Descending, got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Sortable columns
// ---------------------------------------------------------------------------

/// Restaurant columns a list query may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortBy {
    Name,
    Category,
}

impl SortBy {
    /// Every sortable column, in the order they are advertised to clients.
    pub const ALL: [SortBy; 2] = [SortBy::Name, SortBy::Category];

    /// Column name in the `restaurants` table.
    pub fn column(self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Category => "category",
        }
    }

    /// Name used on the wire (`?sortBy=Name`).
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Name => "Name",
            SortBy::Category => "Category",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortBy::ALL
            .into_iter()
            .find(|col| col.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let allowed: Vec<&str> = SortBy::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::Validation(format!(
                    "sortBy must be one of [{}], got '{wanted}'",
                    allowed.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Page arithmetic
// ---------------------------------------------------------------------------

/// Number of rows to skip before `page_number` (1-based), or `None` when
/// the offset does not fit in an `i64`.
pub fn checked_page_offset(page_size: i64, page_number: i64) -> Option<i64> {
    page_number.checked_sub(FIRST_PAGE)?.checked_mul(page_size)
}

/// Number of rows to skip before `page_number` (1-based).
///
/// Saturates instead of overflowing; boundary validation rejects any page
/// for which [`checked_page_offset`] fails.
pub fn page_offset(page_size: i64, page_number: i64) -> i64 {
    checked_page_offset(page_size, page_number).unwrap_or(i64::MAX)
}

/// Number of pages needed to show `total_count` rows.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    total_count / page_size + i64::from(total_count % page_size != 0)
}

/// One page of a list query together with the totals needed to page through it.
///
/// `items_from`/`items_to` are 1-based row positions of the first and last
/// item on this page; both are `0` when the page is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub total_pages: i64,
    pub items_from: i64,
    pub items_to: i64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, page_size: i64, page_number: i64) -> Self {
        let offset = page_offset(page_size, page_number);
        let len = items.len() as i64;
        let (items_from, items_to) = if len == 0 {
            (0, 0)
        } else {
            (offset.saturating_add(1), offset.saturating_add(len))
        };

        Self {
            items,
            total_count,
            total_pages: total_pages(total_count, page_size),
            items_from,
            items_to,
        }
    }

    /// Convert every item, keeping the paging totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            items_from: self.items_from,
            items_to: self.items_to,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- SortDirection -------------------------------------------------------

    #[test]
    fn direction_defaults_to_ascending() {
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
    }

    #[test]
    fn direction_parses_long_and_short_forms() {
        assert_eq!("Ascending".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert_eq!(" descending ".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    }

    #[test]
    fn direction_rejects_unknown_value() {
        let err = "sideways".parse::<SortDirection>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("sideways")));
    }

    #[test]
    fn direction_sql_keywords() {
        assert_eq!(SortDirection::Ascending.as_sql(), "ASC");
        assert_eq!(SortDirection::Descending.as_sql(), "DESC");
    }

    // -- SortBy --------------------------------------------------------------

    #[test]
    fn sort_by_is_case_insensitive() {
        assert_eq!("Name".parse::<SortBy>().unwrap(), SortBy::Name);
        assert_eq!("name".parse::<SortBy>().unwrap(), SortBy::Name);
        assert_eq!("CATEGORY".parse::<SortBy>().unwrap(), SortBy::Category);
    }

    #[test]
    fn sort_by_rejects_columns_outside_allow_list() {
        let err = "Description".parse::<SortBy>().unwrap_err();
        match err {
            CoreError::Validation(msg) => {
                assert!(msg.contains("Name, Category"));
                assert!(msg.contains("Description"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sort_by_maps_to_table_columns() {
        assert_eq!(SortBy::Name.column(), "name");
        assert_eq!(SortBy::Category.column(), "category");
    }

    // -- Page arithmetic -----------------------------------------------------

    #[test]
    fn first_page_has_zero_offset() {
        assert_eq!(page_offset(10, 1), 0);
        assert_eq!(page_offset(15, 3), 30);
    }

    #[test]
    fn offset_overflow_is_detected() {
        assert_eq!(checked_page_offset(100, i64::MAX / 10), None);
        assert_eq!(checked_page_offset(1, i64::MAX), Some(i64::MAX - 1));
        assert_eq!(checked_page_offset(100, i64::MIN), None);
        assert_eq!(page_offset(100, i64::MAX), i64::MAX);
    }

    #[test]
    fn huge_page_number_builds_empty_page() {
        let page: PagedResult<u8> = PagedResult::new(vec![], 0, 100, i64::MAX / 10);
        assert_eq!((page.items_from, page.items_to), (0, 0));
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(total_pages(i64::MAX, 100), i64::MAX / 100 + 1);
    }

    #[test]
    fn paged_result_reports_item_range() {
        let page = PagedResult::new(vec!["d", "e", "f"], 8, 3, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items_from, 4);
        assert_eq!(page.items_to, 6);
    }

    #[test]
    fn paged_result_last_partial_page() {
        let page = PagedResult::new(vec!["g", "h"], 8, 3, 3);
        assert_eq!(page.items_from, 7);
        assert_eq!(page.items_to, 8);
    }

    #[test]
    fn paged_result_empty_page_has_zero_range() {
        let page: PagedResult<&str> = PagedResult::new(vec![], 2, 10, 5);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!((page.items_from, page.items_to), (0, 0));
    }

    #[test]
    fn paged_result_serializes_camel_case() {
        let page = PagedResult::new(vec![1], 1, 10, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["itemsFrom"], 1);
        assert_eq!(json["itemsTo"], 1);
        assert_eq!(json["items"][0], 1);
    }

    #[test]
    fn map_keeps_totals() {
        let page = PagedResult::new(vec![1, 2], 7, 2, 1).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 4);
    }
}
