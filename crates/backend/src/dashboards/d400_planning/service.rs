use anyhow::Result;
use chrono::Utc;
use contracts::dashboards::d400_planning::PlanningRow;
use std::collections::HashMap;

use crate::domain::{a002_expense_contract, a003_cal_plan};
use crate::shared::aggregation;
use crate::shared::format::{format_advance, format_currency};

/// Дашборд планирования: по каждому действующему расходному договору
/// аванс и разбивка календарного плана на текущий месяц и два следующих
pub async fn get_planning_rows() -> Result<Vec<PlanningRow>> {
    let contracts = a002_expense_contract::repository::list_active().await?;

    // Все планы одним запросом, дальше группировка в памяти
    let mut plans_by_contract: HashMap<String, Vec<_>> = HashMap::new();
    for plan in a003_cal_plan::repository::list_all().await? {
        plans_by_contract
            .entry(plan.expense_contract_id.as_string())
            .or_default()
            .push(plan);
    }

    let now = Utc::now();
    let mut rows = Vec::with_capacity(contracts.len());

    for contract in contracts {
        let plans = plans_by_contract
            .remove(&contract.id.as_string())
            .unwrap_or_default();
        let buckets = aggregation::calendar_plan_buckets(&plans, now);
        let advance_amount =
            aggregation::advance_amount(contract.contract_amount, contract.advance_percentage);

        rows.push(PlanningRow {
            id: contract.id.as_string(),
            type_contract: contract.type_contract,
            contract: contract.contract_number,
            client: contract.client,
            start_date: contract.start_date,
            end_date: contract.end_date,
            name: contract.name,
            contract_amount: format_currency(Some(contract.contract_amount)),
            advance: format_advance(contract.advance_percentage),
            advance_amount: format_currency(Some(advance_amount)),
            current_month: format_currency(Some(buckets.current_month)),
            next_month_1: format_currency(Some(buckets.next_month_1)),
            next_month_2: format_currency(Some(buckets.next_month_2)),
            three_month_total: format_currency(Some(buckets.three_month_total)),
            month_names: buckets.month_names,
        });
    }

    Ok(rows)
}
