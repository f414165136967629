use axum::{extract::Path, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::domain::a003_cal_plan;
use contracts::domain::a003_cal_plan::aggregate::{CalPlan, SaveCalPlanDto};

/// GET /api/expense-contracts/:id/cal-plan
pub async fn get_plan(Path(id): Path<String>) -> Result<Json<Vec<CalPlan>>, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a003_cal_plan::service::list_by_contract(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/expense-contracts/:id/cal-plan
///
/// Присланные строки целиком замещают прежний план договора
pub async fn save_plan(
    Path(id): Path<String>,
    Json(dto): Json<SaveCalPlanDto>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;
    match a003_cal_plan::service::save_plan(uuid, dto).await {
        Ok(saved) => Ok(Json(json!({ "saved": saved }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
