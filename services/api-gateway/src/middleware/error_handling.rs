use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use fabrica_utils::{ErrorResponse, FabricaError};

/// Maps domain errors onto HTTP responses: status from
/// `http_status_code()`, JSON body from [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(pub FabricaError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = self.0.error_code(), error = %self.0, "Request failed");
        }

        let body: ErrorResponse = self.0.into();
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<FabricaError>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let response = ApiError(FabricaError::not_an_assembly("RES-001")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError(FabricaError::not_found("part PCA-GONE")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_catalog_errors_map_to_500() {
        let response = ApiError(FabricaError::catalog("root unreadable")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
