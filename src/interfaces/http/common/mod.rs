//! Common API response types and the domain-error-to-status mapping.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response envelope used by every REST endpoint.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Response with pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = ((total as f64) / (page_size.max(1) as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

/// HTTP status a domain error maps to at the API boundary
pub fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        DomainError::MissingRole(_) | DomainError::ReservationAccessDenied => {
            StatusCode::FORBIDDEN
        }
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) | DomainError::CategoryHasBoardGames(_) => StatusCode::CONFLICT,
        DomainError::Validation(_)
        | DomainError::GamesUnavailable(_)
        | DomainError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the error arm of a handler result from a domain error.
pub fn err_response<T>(error: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(&error), Json(ApiResponse::error(error.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        assert_eq!(
            error_status(&DomainError::NotAuthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&DomainError::MissingRole("board-games-manager")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_status(&DomainError::ReservationAccessDenied),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_status(&DomainError::not_found("BoardGame", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::CategoryHasBoardGames(1)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&DomainError::GamesUnavailable(vec![2])),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_status(&DomainError::Storage("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn pagination_rounds_total_pages_up() {
        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![1, 2, 3], 7, 1, 3);
        assert_eq!(page.total_pages, 3);
    }
}
