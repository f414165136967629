use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Доходный договор в отчёте по балансу
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeContractSummary {
    pub id: String,
    pub number: String,
    pub client: String,
    pub amount: Decimal,
    pub paid: Decimal,
}

/// Связанный расходный договор в отчёте по балансу
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseContractSummary {
    pub id: String,
    pub number: String,
    pub amount: Decimal,
    pub paid: Decimal,
}

/// Сводка по одному доходному договору: связанные расходные договоры
/// и три итоговых показателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub income_contract: IncomeContractSummary,
    pub expense_contracts: Vec<ExpenseContractSummary>,
    /// Сумма contract_amount связанных расходных договоров
    pub total_expense: Decimal,
    /// Сумма payment_loesk связанных расходных договоров (None -> 0)
    pub total_paid: Decimal,
    /// paid_amount доходного договора минус total_paid; может быть < 0
    pub balance: Decimal,
}

/// Полный отчёт: по договору + общий итог по всем доходным договорам
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub contracts: Vec<BalanceEntry>,
    pub total_balance: Decimal,
}
