//! Pagination query parameters and list metadata.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::services::PageRequest;

/// Query parameters for paginated lists.
///
/// Out-of-range values are normalized (page floored at 1, pageSize clamped
/// to 100) rather than rejected, so `Validate` carries no rules here.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-based)
    #[param(minimum = 1, example = 1)]
    pub page: Option<i64>,

    /// Number of items per page (max 100)
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// List metadata carried in the envelope's `meta` field.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 10)]
    pub page_size: i64,
    /// Total matching items across all pages.
    #[schema(example = 42)]
    pub total: i64,
    /// `max(1, ceil(total / pageSize))`.
    #[schema(example = 5)]
    pub total_pages: i64,
    /// Sum of stock over the whole catalog; only present on book lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stock: Option<i64>,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: i64) -> Self {
        Self {
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages: request.total_pages(total),
            total_stock: None,
        }
    }

    pub fn with_total_stock(mut self, total_stock: i64) -> Self {
        self.total_stock = Some(total_stock);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_serializes_camel_case() {
        let meta = PageMeta::new(PageRequest::new(Some(2), Some(10)), 35);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["page"], 2);
        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["total"], 35);
        assert_eq!(value["totalPages"], 4);
        assert!(value.get("totalStock").is_none());
    }

    #[test]
    fn total_stock_appears_when_set() {
        let meta = PageMeta::new(PageRequest::new(None, None), 0).with_total_stock(17);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["totalStock"], 17);
        assert_eq!(value["totalPages"], 1);
    }

    #[test]
    fn params_deserialize_from_camel_case_query() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page": 3, "pageSize": 25}"#).unwrap();
        let request = params.to_request();
        assert_eq!(request.page, 3);
        assert_eq!(request.page_size, 25);
    }
}
