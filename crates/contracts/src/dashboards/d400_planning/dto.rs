use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Человекочитаемые названия трёх месячных корзин ("March 2024" и т.п.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabels {
    pub current_month: String,
    pub next_month_1: String,
    pub next_month_2: String,
}

/// Результат разбивки календарного плана по трём месячным корзинам.
/// Границы корзин зависят от "сейчас", поэтому структура пересчитывается
/// на каждый запрос и нигде не кэшируется.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningBuckets {
    pub current_month: Decimal,
    pub next_month_1: Decimal,
    pub next_month_2: Decimal,
    pub three_month_total: Decimal,
    pub month_names: MonthLabels,
}

/// Строка дашборда планирования: один расходный договор с авансом
/// и трёхмесячной разбивкой плана (суммы уже отформатированы в валюту)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningRow {
    pub id: String,
    pub type_contract: String,
    pub contract: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub name: String,
    pub contract_amount: String,
    /// "50%" или пустая строка, если аванс не задан
    pub advance: String,
    pub advance_amount: String,
    pub current_month: String,
    pub next_month_1: String,
    pub next_month_2: String,
    pub three_month_total: String,
    pub month_names: MonthLabels,
}
