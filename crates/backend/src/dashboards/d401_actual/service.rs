use anyhow::Result;
use contracts::dashboards::d401_actual::ActualRow;

use crate::domain::{a002_expense_contract, a004_cost_item, a005_closed_work};
use crate::shared::aggregation;
use crate::shared::format::{format_advance, format_currency};

/// Дашборд фактического исполнения: оплата, затраты подрядчика,
/// закрытые работы, сальдо и остаток финансирования
pub async fn get_actual_rows() -> Result<Vec<ActualRow>> {
    let contracts = a002_expense_contract::repository::list_active().await?;
    let mut rows = Vec::with_capacity(contracts.len());

    for contract in contracts {
        let id = contract.id.value();
        let cost_items = a004_cost_item::repository::list_by_contract(id).await?;
        let closed_works = a005_closed_work::repository::list_by_contract(id).await?;

        let contractor_costs = aggregation::contractor_costs_total(&cost_items);
        let closed_total = aggregation::closed_works_total(&closed_works);
        let balance = aggregation::balance(contract.payment_loesk, contractor_costs);
        let remaining =
            aggregation::remaining_funding(contract.contract_amount, contract.payment_loesk);

        rows.push(ActualRow {
            id: contract.id.as_string(),
            type_contract: contract.type_contract,
            contract: contract.contract_number,
            client: contract.client,
            start_date: contract.start_date,
            end_date: contract.end_date,
            name: contract.name,
            contract_amount: format_currency(Some(contract.contract_amount)),
            advance: format_advance(contract.advance_percentage),
            payment_loesk: format_currency(contract.payment_loesk),
            contractor_costs: format_currency(Some(contractor_costs)),
            closed_works: format_currency(Some(closed_total)),
            balance: format_currency(Some(balance)),
            remaining_funding: format_currency(Some(remaining)),
        });
    }

    Ok(rows)
}
