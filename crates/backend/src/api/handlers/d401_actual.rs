use axum::{http::StatusCode, Json};
use contracts::dashboards::d401_actual::ActualRow;

use crate::dashboards::d401_actual;

/// GET /api/d401/actual
pub async fn get_actual() -> Result<Json<Vec<ActualRow>>, StatusCode> {
    match d401_actual::service::get_actual_rows().await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Actual dashboard failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
