use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::envelope::ApiResponse;

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    let body = Json(ApiResponse::<()>::failure(
        "The requested resource was not found",
        "not_found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
