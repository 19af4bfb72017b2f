use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use medstock_core::{Medicine, MedicineId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_medicines).post(add_medicine))
        .route("/:id", delete(delete_medicine).put(update_quantity))
}

pub async fn list_medicines(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListMedicinesParams>,
) -> axum::response::Response {
    match services.list(params.search.as_deref()).await {
        Ok(medicines) => (StatusCode::OK, Json(medicines)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn add_medicine(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddMedicineRequest>,
) -> axum::response::Response {
    let medicine = Medicine::new(body.id, body.name, body.quantity, body.price);

    match services.add(medicine).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Medicine added successfully" })),
        )
            .into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn update_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(params): Query<dto::UpdateQuantityParams>,
) -> axum::response::Response {
    let id: MedicineId = match id.parse::<i64>() {
        Ok(v) => MedicineId::new(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid medicine id")
        }
    };

    match services.update_quantity(id, params.quantity).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Quantity updated successfully" })),
        )
            .into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn delete_medicine(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MedicineId = match id.parse::<i64>() {
        Ok(v) => MedicineId::new(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid medicine id")
        }
    };

    match services.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Medicine deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
