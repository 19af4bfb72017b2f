use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use medstock_core::DomainError;
use medstock_infra::InventoryError;

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    match err {
        InventoryError::Domain(DomainError::Conflict(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "conflict", msg)
        }
        InventoryError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Medicine not found")
        }
        InventoryError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

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
        })),
    )
        .into_response()
}
