pub mod dto;

pub use dto::{BalanceEntry, BalanceReport, ExpenseContractSummary, IncomeContractSummary};
