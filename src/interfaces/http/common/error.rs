//! DomainError → HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::ApiResponse;
use crate::domain::{DomainError, ErrorKind};

/// Handler error: a domain failure rendered as an `ApiResponse` envelope.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage details stay in the logs
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
            "Internal server error".to_string()
        } else {
            warn!(error = %self.0, status = status.as_u16(), "Request rejected");
            self.0.to_string()
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StorageError;
    use uuid::Uuid;

    #[test]
    fn kinds_map_to_statuses() {
        let id = Uuid::new_v4();
        let cases = [
            (DomainError::CityNotFound("X".into()), StatusCode::NOT_FOUND),
            (DomainError::NoProductToRemove(id), StatusCode::NOT_FOUND),
            (DomainError::ReceptionAlreadyInProgress(id), StatusCode::CONFLICT),
            (DomainError::NoActiveReception(id), StatusCode::CONFLICT),
            (DomainError::Validation("limit".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::internal("op")(StorageError::Corrupt("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let err = DomainError::internal("list overview")(StorageError::Corrupt("secret".into()));
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Internal server error");
    }
}
