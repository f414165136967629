pub mod common;

pub mod a001_income_contract;
pub mod a002_expense_contract;
pub mod a003_cal_plan;
pub mod a004_cost_item;
pub mod a005_closed_work;
