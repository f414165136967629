use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_expense_contract::aggregate::ExpenseContractId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostItemId(pub Uuid);

impl CostItemId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

/// Статья затрат: отдельный зафиксированный платёж по расходному договору
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostItem {
    pub id: CostItemId,
    pub expense_contract_id: ExpenseContractId,
    pub date: NaiveDate,
    /// Контрагент, которому выполнен платёж
    pub counterparty: String,
    pub category: String,
    pub purpose: String,
    pub amount: Decimal,
}

impl CostItem {
    pub fn new_for_insert(
        expense_contract_id: ExpenseContractId,
        date: NaiveDate,
        counterparty: String,
        category: String,
        purpose: String,
        amount: Decimal,
    ) -> Self {
        Self {
            id: CostItemId::new_v4(),
            expense_contract_id,
            date,
            counterparty,
            category,
            purpose,
            amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CostItemDto {
    pub date: Option<NaiveDate>,
    #[serde(alias = "kontragent")]
    pub counterparty: Option<String>,
    pub category: Option<String>,
    pub purpose: Option<String>,
    pub amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_accepts_kontragent_alias() {
        let dto: CostItemDto =
            serde_json::from_str(r#"{"kontragent": "ИП Петров", "amount": "1500.50"}"#).unwrap();
        assert_eq!(dto.counterparty.as_deref(), Some("ИП Петров"));
        assert_eq!(dto.amount, Some(Decimal::new(1500_50, 2)));
    }
}
