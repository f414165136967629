use axum::{http::StatusCode, Json};
use contracts::dashboards::d402_balance::BalanceReport;

use crate::dashboards::d402_balance;

/// GET /api/d402/balance
pub async fn get_balance() -> Result<Json<BalanceReport>, StatusCode> {
    match d402_balance::service::get_balance_report().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!("Balance report failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
