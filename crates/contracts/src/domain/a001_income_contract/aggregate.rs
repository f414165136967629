use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::EntityMetadata;

/// Статус договора, при котором он может служить источником финансирования
pub const STATUS_ACTIVE: &str = "active";

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncomeContractId(pub Uuid);

impl IncomeContractId {
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

/// Доходный договор: деньги, причитающиеся оператору от заказчика
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeContract {
    pub id: IncomeContractId,
    pub contract_number: String,
    pub contract_date: NaiveDate,
    pub client: String,
    pub contract_amount: Decimal,
    /// Сколько заказчик уже оплатил; None трактуется как ноль в расчётах
    pub paid_amount: Option<Decimal>,
    pub status: String,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl IncomeContract {
    pub fn new_for_insert(
        contract_number: String,
        contract_date: NaiveDate,
        client: String,
        contract_amount: Decimal,
        paid_amount: Option<Decimal>,
    ) -> Self {
        Self {
            id: IncomeContractId::new_v4(),
            contract_number,
            contract_date,
            client,
            contract_amount,
            paid_amount,
            status: STATUS_ACTIVE.to_string(),
            metadata: EntityMetadata::new(),
        }
    }

    /// Доступен ли договор как источник финансирования
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE && !self.metadata.is_deleted()
    }

    pub fn update(&mut self, dto: &IncomeContractDto) {
        if let Some(ref number) = dto.contract_number {
            self.contract_number = number.clone();
        }
        if let Some(date) = dto.contract_date {
            self.contract_date = date;
        }
        if let Some(ref client) = dto.client {
            self.client = client.clone();
        }
        if let Some(amount) = dto.contract_amount {
            self.contract_amount = amount;
        }
        if let Some(paid) = dto.paid_amount {
            self.paid_amount = Some(paid);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.contract_number.trim().is_empty() {
            return Err("Номер договора не может быть пустым".into());
        }
        if self.client.trim().is_empty() {
            return Err("Заказчик не может быть пустым".into());
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
pub struct IncomeContractDto {
    pub id: Option<String>,
    pub contract_number: Option<String>,
    pub contract_date: Option<NaiveDate>,
    pub client: Option<String>,
    pub contract_amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
}

/// Вариант для выпадающего списка "источник финансирования"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeContractOption {
    pub value: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn contract() -> IncomeContract {
        IncomeContract::new_for_insert(
            "ДГ-001-24".into(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "ООО \"Ромашка\"".into(),
            Decimal::new(5_000_000_00, 2),
            None,
        )
    }

    #[test]
    fn new_contract_is_active_funding_source() {
        assert!(contract().is_active());
    }

    #[test]
    fn non_active_status_disables_funding() {
        let mut c = contract();
        c.status = "completed".into();
        assert!(!c.is_active());
    }

    #[test]
    fn soft_deleted_contract_is_not_a_funding_source() {
        let mut c = contract();
        c.metadata.mark_deleted();
        assert!(!c.is_active());
    }

    #[test]
    fn validate_rejects_blank_number_and_client() {
        let mut c = contract();
        c.contract_number = "  ".into();
        assert!(c.validate().is_err());

        let mut c = contract();
        c.client = String::new();
        assert!(c.validate().is_err());
    }

    #[test]
    fn update_applies_only_provided_fields() {
        let mut c = contract();
        let dto = IncomeContractDto {
            paid_amount: Some(Decimal::new(1_000_000_00, 2)),
            ..Default::default()
        };
        c.update(&dto);
        assert_eq!(c.paid_amount, Some(Decimal::new(1_000_000_00, 2)));
        assert_eq!(c.contract_number, "ДГ-001-24");
    }

    #[test]
    fn metadata_is_flattened_in_json() {
        let json = serde_json::to_value(contract()).unwrap();
        assert!(json.get("created_at").is_some());
        assert!(json.get("metadata").is_none());
    }
}
