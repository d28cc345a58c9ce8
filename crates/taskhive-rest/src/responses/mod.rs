//! API response types.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use taskhive_core::{ErrorResponse, TaskhiveError};
use taskhive_service::CacheLookup;

/// Name of the response header reporting cache provenance.
pub const CACHE_HEADER: &str = "x-cache";

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(error: ErrorResponse) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub TaskhiveError);

impl From<TaskhiveError> for AppError {
    fn from(err: TaskhiveError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::<()>::error(error_response));

        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Result type for handlers serving cache-aware reads.
pub type CachedApiResult<T> =
    Result<([(HeaderName, HeaderValue); 1], Json<ApiResponse<T>>), AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Helper to create a success response carrying the `x-cache` marker.
pub fn ok_cached<T: Serialize>(lookup: CacheLookup<T>) -> CachedApiResult<T> {
    let marker = if lookup.cached { "hit" } else { "miss" };
    Ok((
        [(
            HeaderName::from_static(CACHE_HEADER),
            HeaderValue::from_static(marker),
        )],
        Json(ApiResponse::success(lookup.value)),
    ))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let response = ApiResponse::success(42);
        assert!(response.success);
        assert_eq!(response.data, Some(42));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_cached_marker_values() {
        let hit = ok_cached(CacheLookup::hit(1)).unwrap();
        assert_eq!(hit.0[0].1, HeaderValue::from_static("hit"));

        let miss = ok_cached(CacheLookup::miss(1)).unwrap();
        assert_eq!(miss.0[0].1, HeaderValue::from_static("miss"));
    }
}
