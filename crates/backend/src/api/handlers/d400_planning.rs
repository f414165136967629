use axum::{http::StatusCode, Json};
use contracts::dashboards::d400_planning::PlanningRow;

use crate::dashboards::d400_planning;

/// GET /api/d400/planning
pub async fn get_planning() -> Result<Json<Vec<PlanningRow>>, StatusCode> {
    match d400_planning::service::get_planning_rows().await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Planning dashboard failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
