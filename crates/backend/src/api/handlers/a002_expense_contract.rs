use axum::{extract::Path, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::domain::a002_expense_contract;
use contracts::domain::a002_expense_contract::aggregate::{ExpenseContract, ExpenseContractDto};

/// GET /api/expense-contracts
pub async fn list_all() -> Result<Json<Vec<ExpenseContract>>, StatusCode> {
    match a002_expense_contract::service::list_active().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/expense-contracts/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ExpenseContract>, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a002_expense_contract::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/expense-contracts
pub async fn create(
    Json(dto): Json<ExpenseContractDto>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match a002_expense_contract::service::create(dto).await {
        Ok(id) => Ok(Json(json!({ "id": id.to_string() }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// PUT /api/expense-contracts/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<ExpenseContractDto>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;
    match a002_expense_contract::service::update(uuid, dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// DELETE /api/expense-contracts/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a002_expense_contract::service::delete(uuid).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
