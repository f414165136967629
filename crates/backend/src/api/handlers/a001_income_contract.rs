use axum::{extract::Path, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::domain::a001_income_contract;
use contracts::domain::a001_income_contract::aggregate::{
    IncomeContract, IncomeContractDto, IncomeContractOption,
};

/// GET /api/income-contracts
pub async fn list_all() -> Result<Json<Vec<IncomeContract>>, StatusCode> {
    match a001_income_contract::service::list_active().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/income-contracts/options
pub async fn funding_options() -> Result<Json<Vec<IncomeContractOption>>, StatusCode> {
    match a001_income_contract::service::list_funding_options().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/income-contracts/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<IncomeContract>, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a001_income_contract::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/income-contracts
pub async fn create(
    Json(dto): Json<IncomeContractDto>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match a001_income_contract::service::create(dto).await {
        Ok(id) => Ok(Json(json!({ "id": id.to_string() }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// PUT /api/income-contracts/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<IncomeContractDto>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;
    match a001_income_contract::service::update(uuid, dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

/// DELETE /api/income-contracts/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a001_income_contract::service::delete(uuid).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
