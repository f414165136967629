use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_expense_contract::aggregate::ExpenseContractId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalPlanId(pub Uuid);

impl CalPlanId {
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

/// Строка календарного плана финансирования: планируемая выплата за месяц.
/// Дата ожидается с точностью до первого числа месяца, но расчёты
/// на это не полагаются и сами усекают дату до начала месяца.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalPlan {
    pub id: CalPlanId,
    pub expense_contract_id: ExpenseContractId,
    pub date: NaiveDate,
    /// Планируемая сумма; None пропускается при суммировании
    pub amount: Option<Decimal>,
}

impl CalPlan {
    pub fn new_for_insert(
        expense_contract_id: ExpenseContractId,
        date: NaiveDate,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            id: CalPlanId::new_v4(),
            expense_contract_id,
            date,
            amount,
        }
    }
}

/// Строка плана в запросе на полную замену плана договора
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalPlanEntryDto {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Тело POST /api/expense-contracts/:id/cal-plan
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaveCalPlanDto {
    #[serde(default)]
    pub plans: Vec<CalPlanEntryDto>,
}
