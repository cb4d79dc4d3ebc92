use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orgdesk_core::AppError;
use serde::Serialize;

/// API error payload with a stable kind discriminator for UI branching.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    kind: &'static str,
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::InvalidTransition(_) => (StatusCode::CONFLICT, "invalid_transition"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        let payload = Json(ErrorResponse {
            kind,
            message: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use orgdesk_core::AppError;

    use super::ApiError;

    #[test]
    fn conflict_and_stale_state_both_map_to_http_409() {
        let conflict = ApiError(AppError::Conflict("locked".to_owned())).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let stale =
            ApiError(AppError::InvalidTransition("already resolved".to_owned())).into_response();
        assert_eq!(stale.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn forbidden_maps_to_http_403() {
        let response = ApiError(AppError::Forbidden("no privilege".to_owned())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
