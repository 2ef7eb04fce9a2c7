use axum::http::{
    header::{CACHE_CONTROL, HeaderName},
    HeaderMap, HeaderValue,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::repositories::{PageMetadata, PageRequest};

pub const X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

const MAX_PAGE_SIZE: i64 = 50;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 1, minimum = 1)]
    pub page_number: Option<i64>,
    #[param(default = 10, minimum = 1, maximum = 50)]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Clamp the raw query values into a valid page request
    pub fn page_request(&self) -> AppResult<PageRequest> {
        let page_number = self.page_number.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(PageRequest::DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE);

        PageRequest::new(page_number as u64, page_size as u64)
    }
}

/// Headers for a cacheable page of results
pub fn pagination_headers(metadata: &PageMetadata) -> AppResult<HeaderMap> {
    let value = serde_json::to_string(metadata)
        .map_err(|e| AppError::Internal(format!("Pagination header encoding failed: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        X_PAGINATION,
        HeaderValue::from_str(&value)
            .map_err(|e| AppError::Internal(format!("Invalid pagination header: {}", e)))?,
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=60"));

    Ok(headers)
}

/// Keys are assigned by the database starting at 1
pub fn validate_id(id: i32) -> AppResult<()> {
    if id < 1 {
        return Err(AppError::Validation(format!("Invalid id {}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page_number: Option<i64>, page_size: Option<i64>) -> PaginationParams {
        PaginationParams {
            page_number,
            page_size,
        }
    }

    #[test]
    fn test_defaults() {
        let page = params(None, None).page_request().unwrap();
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), 10);
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let page = params(Some(-3), Some(500)).page_request().unwrap();
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), 50);

        let page = params(Some(2), Some(0)).page_request().unwrap();
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.page_size(), 1);
    }

    #[test]
    fn test_pagination_headers() {
        let metadata = PageMetadata::new(3, PageRequest::new(1, 2).unwrap());
        let headers = pagination_headers(&metadata).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(headers[&X_PAGINATION].to_str().unwrap()).unwrap();
        assert_eq!(value["total_count"], 3);
        assert_eq!(value["total_pages"], 2);
        assert_eq!(value["has_next"], true);
        assert_eq!(headers[CACHE_CONTROL], "public, max-age=60");
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1).is_ok());
        assert!(matches!(validate_id(0), Err(AppError::Validation(_))));
    }
}
