use anyhow::Result;
use contracts::dashboards::d402_balance::BalanceReport;

use crate::domain::{a001_income_contract, a002_expense_contract};
use crate::shared::aggregation;

/// Отчёт по балансу: соединение доходных и расходных договоров
/// по источнику финансирования выполняется в памяти
pub async fn get_balance_report() -> Result<BalanceReport> {
    let income = a001_income_contract::repository::list_active().await?;
    let expense = a002_expense_contract::repository::list_active().await?;
    Ok(aggregation::balance_rollup(&income, &expense))
}
