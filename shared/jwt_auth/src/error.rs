use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
#[error("missing role: {missing_role}")]
pub struct MissingRoleError {
    pub missing_role: String,
}

///
/// Returned when the request reached a handler without a verified caller
///
#[derive(Debug, thiserror::Error)]
#[error("unauthenticated")]
pub struct UnauthenticatedError;

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for UnauthenticatedError {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let body = ErrorBody {
            error: "Unauthorized",
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
