//! Pagination for list endpoints.
//!
//! Two styles are accepted on every list endpoint:
//!
//! - **Offset-based**: `limit` + `offset`
//! - **Page-based**: `limit` + `page` (1-indexed)
//!
//! `limit` (alias `page_size`) is clamped to 1..=100 and defaults to 10.
//! When `page` is present it wins over `offset`.
//!
//! # Example
//!
//! ```ignore
//! async fn list_teachers(
//!     ApiQuery(pagination): ApiQuery<PaginationParams>,
//! ) -> Result<Json<PaginatedTeachersResponse>, AppError> {
//!     let teachers = fetch(pagination.limit(), pagination.offset()).await?;
//!     let total = count().await?;
//!
//!     Ok(Json(PaginatedTeachersResponse {
//!         data: teachers,
//!         meta: PaginationMeta::new(total, &pagination),
//!     }))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Deserializes an optional query value into an optional i64, mapping the
/// empty string to `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// { "total": 42, "limit": 10, "offset": 20, "page": 3, "has_more": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching items across all pages
    pub total: i64,
    /// Maximum items per page (the limit that was applied)
    pub limit: i64,
    /// Number of items skipped (present for offset-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page number (present for page-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        let page = params.page();

        Self {
            total,
            limit,
            offset: if page.is_some() { None } else { Some(offset) },
            page,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Pagination query parameters.
#[derive(Debug, Clone, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10). Also accepted as `page_size`.
    #[serde(default, alias = "page_size", deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0, ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    /// Effective limit, clamped to [1, 100]; 10 when absent.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Effective offset: derived from `page` when present, else the explicit
    /// offset. Never negative.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page() {
            (page - 1).saturating_mul(self.limit())
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    /// The page number if provided, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_defaults() {
        let p = params(None, None, None);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_limit_boundary_cases() {
        for (input, expected) in [
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
        ] {
            assert_eq!(params(input, None, None).limit(), expected);
        }
    }

    #[test]
    fn test_negative_offset_is_clamped() {
        assert_eq!(params(Some(10), Some(-5), None).offset(), 0);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(20), Some(7), Some(3));
        assert_eq!(p.offset(), 40);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        let p = params(Some(10), None, Some(-2));
        assert_eq!(p.page(), Some(1));
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_meta_for_offset_request() {
        let meta = PaginationMeta::new(25, &params(Some(10), Some(10), None));
        assert_eq!(meta.offset, Some(10));
        assert_eq!(meta.page, None);
        assert!(meta.has_more);

        let last = PaginationMeta::new(25, &params(Some(10), Some(20), None));
        assert!(!last.has_more);
    }

    #[test]
    fn test_meta_for_page_request() {
        let meta = PaginationMeta::new(30, &params(Some(10), None, Some(3)));
        assert_eq!(meta.page, Some(3));
        assert_eq!(meta.offset, None);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_with_huge_offset_does_not_overflow() {
        let meta = PaginationMeta::new(5, &params(Some(10), Some(i64::MAX), None));
        assert_eq!(meta.offset, Some(i64::MAX));
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_with_huge_page_does_not_overflow() {
        let p = params(Some(10), None, Some(i64::MAX));
        assert_eq!(p.offset(), i64::MAX);

        let meta = PaginationMeta::new(5, &p);
        assert_eq!(meta.page, Some(i64::MAX));
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_serialization_skips_absent_fields() {
        let meta = PaginationMeta::new(0, &params(None, None, Some(1)));
        let serialized = serde_json::to_value(&meta).unwrap();
        assert_eq!(serialized["total"], 0);
        assert_eq!(serialized["page"], 1);
        assert!(serialized.get("offset").is_none());
        assert_eq!(serialized["has_more"], false);
    }

    #[test]
    fn test_deserialize_treats_empty_strings_as_missing() {
        let p: PaginationParams = serde_json::from_str(r#"{"limit":"","offset":""}"#).unwrap();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_deserialize_page_size_alias() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"page_size":"25","page":"2"}"#).unwrap();
        assert_eq!(p.limit(), 25);
        assert_eq!(p.offset(), 25);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<PaginationParams>(r#"{"limit":"ten"}"#).is_err());
    }
}
