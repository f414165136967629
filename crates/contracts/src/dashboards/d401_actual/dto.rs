use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Строка дашборда фактического исполнения: оплата, затраты подрядчика,
/// закрытые работы, сальдо и остаток финансирования по одному
/// расходному договору (суммы отформатированы в валюту)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualRow {
    pub id: String,
    pub type_contract: String,
    pub contract: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub name: String,
    pub contract_amount: String,
    pub advance: String,
    pub payment_loesk: String,
    pub contractor_costs: String,
    pub closed_works: String,
    /// Может быть отрицательным: перерасход допустим
    pub balance: String,
    pub remaining_funding: String,
}
