use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a002_expense_contract::aggregate::ExpenseContractId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClosedWorkId(pub Uuid);

impl ClosedWorkId {
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

/// Закрытая работа: акт КС с суммой и необязательным PDF-файлом
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedWork {
    pub id: ClosedWorkId,
    pub expense_contract_id: ExpenseContractId,
    pub act_number: String,
    pub act_date: NaiveDate,
    pub amount: Decimal,
    /// Исходное имя загруженного файла
    pub file_name: Option<String>,
    /// Путь к файлу в хранилище вложений
    pub file_path: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ClosedWork {
    pub fn new_for_insert(
        expense_contract_id: ExpenseContractId,
        act_number: String,
        act_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ClosedWorkId::new_v4(),
            expense_contract_id,
            act_number,
            act_date,
            amount,
            file_name: None,
            file_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_file(&self) -> bool {
        self.file_path.is_some()
    }
}

/// Представление акта для API: вместо серверного пути отдаём ссылку на файл
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedWorkView {
    pub id: String,
    pub expense_contract_id: String,
    pub act_number: String,
    pub act_date: NaiveDate,
    pub amount: Decimal,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&ClosedWork> for ClosedWorkView {
    fn from(work: &ClosedWork) -> Self {
        let file_url = work
            .has_file()
            .then(|| format!("/api/closed-works/{}/file", work.id.value()));
        Self {
            id: work.id.value().to_string(),
            expense_contract_id: work.expense_contract_id.as_string(),
            act_number: work.act_number.clone(),
            act_date: work.act_date,
            amount: work.amount,
            file_url,
            file_name: work.file_name.clone(),
            created_at: work.created_at,
        }
    }
}
