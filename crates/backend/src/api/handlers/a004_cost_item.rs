use axum::{extract::Path, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::domain::a004_cost_item;
use contracts::domain::a004_cost_item::aggregate::{CostItem, CostItemDto};

/// GET /api/expense-contracts/:id/cost-items
pub async fn list_by_contract(Path(id): Path<String>) -> Result<Json<Vec<CostItem>>, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a004_cost_item::service::list_by_contract(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/expense-contracts/:id/cost-items
pub async fn create(
    Path(id): Path<String>,
    Json(dto): Json<CostItemDto>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;
    match a004_cost_item::service::create(uuid, dto).await {
        Ok(item_id) => Ok(Json(json!({ "id": item_id.to_string() }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// PUT /api/cost-items/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<CostItemDto>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;
    match a004_cost_item::service::update(uuid, dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// DELETE /api/cost-items/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a004_cost_item::service::delete(uuid).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
