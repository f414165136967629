use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_income_contract::aggregate::IncomeContractId;
use crate::domain::common::EntityMetadata;

pub const STATUS_ACTIVE: &str = "active";

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseContractId(pub Uuid);

impl ExpenseContractId {
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

// ============================================================================
// Aggregate Root
// ============================================================================

/// Расходный договор: обязательство оператора перед подрядчиком,
/// финансируемое конкретным доходным договором
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseContract {
    pub id: ExpenseContractId,
    pub contract_number: String,
    /// Тип программы ("ремонтная программа", "инвестиционная программа", ...)
    pub type_contract: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub name: String,
    /// Контрагент (подрядчик)
    pub client: String,
    pub contract_amount: Decimal,
    /// Процент аванса 0-100; диапазон намеренно не проверяется
    pub advance_percentage: Option<Decimal>,
    /// Сумма, фактически оплаченная подрядчику на текущий момент
    pub payment_loesk: Option<Decimal>,
    /// Источник финансирования
    pub income_contract_id: IncomeContractId,
    pub status: String,
    /// Признак МЭС
    pub is_mes: bool,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ExpenseContract {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        contract_number: String,
        type_contract: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        name: String,
        client: String,
        contract_amount: Decimal,
        advance_percentage: Option<Decimal>,
        income_contract_id: IncomeContractId,
        is_mes: bool,
    ) -> Self {
        Self {
            id: ExpenseContractId::new_v4(),
            contract_number,
            type_contract,
            start_date,
            end_date,
            name,
            client,
            contract_amount,
            advance_percentage,
            // Новый договор ещё не оплачивался
            payment_loesk: Some(Decimal::ZERO),
            income_contract_id,
            status: STATUS_ACTIVE.to_string(),
            is_mes,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &ExpenseContractDto) {
        if let Some(ref number) = dto.contract_number {
            self.contract_number = number.clone();
        }
        if let Some(ref type_contract) = dto.type_contract {
            self.type_contract = type_contract.clone();
        }
        if let Some(date) = dto.start_date {
            self.start_date = date;
        }
        if let Some(date) = dto.end_date {
            self.end_date = date;
        }
        if let Some(ref name) = dto.name {
            self.name = name.clone();
        }
        if let Some(ref client) = dto.client {
            self.client = client.clone();
        }
        if let Some(amount) = dto.contract_amount {
            self.contract_amount = amount;
        }
        if let Some(advance) = dto.advance_percentage {
            self.advance_percentage = Some(advance);
        }
        if let Some(payment) = dto.payment_loesk {
            self.payment_loesk = Some(payment);
        }
        if let Some(is_mes) = dto.is_mes {
            self.is_mes = is_mes;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.contract_number.trim().is_empty() {
            return Err("Номер договора не может быть пустым".into());
        }
        if self.name.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if self.client.trim().is_empty() {
            return Err("Контрагент не может быть пустым".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExpenseContractDto {
    pub id: Option<String>,
    pub contract_number: Option<String>,
    pub type_contract: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub client: Option<String>,
    pub contract_amount: Option<Decimal>,
    pub advance_percentage: Option<Decimal>,
    pub payment_loesk: Option<Decimal>,
    /// Идентификатор доходного договора; фронтенд шлёт его как funding_source
    #[serde(alias = "funding_source")]
    pub income_contract_id: Option<String>,
    pub is_mes: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_accepts_funding_source_alias() {
        let dto: ExpenseContractDto = serde_json::from_str(
            r#"{"funding_source": "4b4e60de-8e70-4a3f-9fbe-7f2b2f1a5f03"}"#,
        )
        .unwrap();
        assert_eq!(
            dto.income_contract_id.as_deref(),
            Some("4b4e60de-8e70-4a3f-9fbe-7f2b2f1a5f03")
        );
    }

    #[test]
    fn new_contract_starts_with_zero_payment() {
        let contract = ExpenseContract::new_for_insert(
            "РД-001-24".into(),
            "ремонтная программа".into(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            "Строительство офисного здания".into(),
            "ООО \"СтройМонтаж\"".into(),
            Decimal::new(2_500_000_00, 2),
            Some(Decimal::new(50_00, 2)),
            IncomeContractId::new_v4(),
            false,
        );
        assert_eq!(contract.payment_loesk, Some(Decimal::ZERO));
        assert_eq!(contract.status, STATUS_ACTIVE);
    }

    #[test]
    fn validate_requires_name_and_client() {
        let mut contract = ExpenseContract::new_for_insert(
            "РД-001-24".into(),
            "инвестиционная программа".into(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            "Реконструкция подстанции".into(),
            "ООО \"Подрядчик\"".into(),
            Decimal::new(1_000_000_00, 2),
            None,
            IncomeContractId::new_v4(),
            true,
        );
        assert!(contract.validate().is_ok());
        contract.name = " ".into();
        assert!(contract.validate().is_err());
    }
}
