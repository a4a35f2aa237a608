use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use productlist_core::DomainError;
use productlist_infra::ProductStoreError;

pub const NO_MATCHES: &str = "No products found matching the criteria";
pub const INTERNAL_ERROR: &str = "Internal server error";

pub fn store_error_to_response(err: ProductStoreError) -> axum::response::Response {
    match err {
        ProductStoreError::NotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Product not found for ID: {id}"),
        ),
        // Load details stay in the logs.
        ProductStoreError::LoadFailure { .. } => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", INTERNAL_ERROR)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::DuplicateId(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", INTERNAL_ERROR)
        }
    }
}

/// Error envelope: `{"error", "message", "statusCode", "timestamp"}`.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
            "statusCode": status.as_u16().to_string(),
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })),
    )
        .into_response()
}
