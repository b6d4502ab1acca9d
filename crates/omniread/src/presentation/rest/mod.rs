pub mod fallback;
pub mod health;
pub mod image;
pub mod relay;

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

/// Unknown relay paths are API errors, anything else belongs to the application shell
pub async fn not_found(req: Request) -> Response {
    if req.uri().path().starts_with("/relay") {
        return error_response(StatusCode::NOT_FOUND, "relay endpoint not found");
    }

    #[cfg(feature = "embed")]
    let res = super::assets::static_handler(req).await;
    #[cfg(not(feature = "embed"))]
    let res = error_response(StatusCode::NOT_FOUND, "not found");

    res
}
