use apikit_core::BackendError;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Bridge from [`BackendError`] to an axum response
///
/// The response status comes from the error; the body is the error's stable
/// JSON projection, suitable for direct consumption by API clients.
#[derive(Debug, Clone)]
pub struct ApiError(pub BackendError);

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}
