use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddMedicineRequest {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Query parameters for `GET /medicines`.
#[derive(Debug, Deserialize)]
pub struct ListMedicinesParams {
    pub search: Option<String>,
}

/// Query parameters for `PUT /medicines/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityParams {
    pub quantity: i64,
}
