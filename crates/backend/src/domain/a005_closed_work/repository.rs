use chrono::Utc;
use contracts::domain::a002_expense_contract::aggregate::ExpenseContractId;
use contracts::domain::a005_closed_work::aggregate::{ClosedWork, ClosedWorkId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_closed_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expense_contract_id: String,
    pub act_number: String,
    pub act_date: chrono::NaiveDate,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ClosedWork {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let contract = Uuid::parse_str(&m.expense_contract_id).unwrap_or_else(|_| Uuid::new_v4());
        ClosedWork {
            id: ClosedWorkId(uuid),
            expense_contract_id: ExpenseContractId(contract),
            act_number: m.act_number,
            act_date: m.act_date,
            amount: m.amount,
            file_name: m.file_name,
            file_path: m.file_path,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_by_contract(expense_contract_id: Uuid) -> anyhow::Result<Vec<ClosedWork>> {
    let items = Entity::find()
        .filter(Column::ExpenseContractId.eq(expense_contract_id.to_string()))
        .order_by_asc(Column::ActDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ClosedWork>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(work: &ClosedWork) -> anyhow::Result<Uuid> {
    let uuid = work.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        expense_contract_id: Set(work.expense_contract_id.as_string()),
        act_number: Set(work.act_number.clone()),
        act_date: Set(work.act_date),
        amount: Set(work.amount),
        file_name: Set(work.file_name.clone()),
        file_path: Set(work.file_path.clone()),
        created_at: Set(Some(work.created_at)),
        updated_at: Set(Some(work.updated_at)),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(work: &ClosedWork) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(work.id.as_string()),
        expense_contract_id: Set(work.expense_contract_id.as_string()),
        act_number: Set(work.act_number.clone()),
        act_date: Set(work.act_date),
        amount: Set(work.amount),
        file_name: Set(work.file_name.clone()),
        file_path: Set(work.file_path.clone()),
        updated_at: Set(Some(work.updated_at)),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

/// Акты удаляются физически, вместе с вложением
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
