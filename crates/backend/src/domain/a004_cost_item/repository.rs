use contracts::domain::a002_expense_contract::aggregate::ExpenseContractId;
use contracts::domain::a004_cost_item::aggregate::{CostItem, CostItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_cost_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expense_contract_id: String,
    pub date: chrono::NaiveDate,
    pub counterparty: String,
    pub category: String,
    pub purpose: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CostItem {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let contract = Uuid::parse_str(&m.expense_contract_id).unwrap_or_else(|_| Uuid::new_v4());
        CostItem {
            id: CostItemId(uuid),
            expense_contract_id: ExpenseContractId(contract),
            date: m.date,
            counterparty: m.counterparty,
            category: m.category,
            purpose: m.purpose,
            amount: m.amount,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_by_contract(expense_contract_id: Uuid) -> anyhow::Result<Vec<CostItem>> {
    let items = Entity::find()
        .filter(Column::ExpenseContractId.eq(expense_contract_id.to_string()))
        .order_by_asc(Column::Date)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CostItem>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(item: &CostItem) -> anyhow::Result<Uuid> {
    let uuid = item.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        expense_contract_id: Set(item.expense_contract_id.as_string()),
        date: Set(item.date),
        counterparty: Set(item.counterparty.clone()),
        category: Set(item.category.clone()),
        purpose: Set(item.purpose.clone()),
        amount: Set(item.amount),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(item: &CostItem) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(item.id.as_string()),
        expense_contract_id: Set(item.expense_contract_id.as_string()),
        date: Set(item.date),
        counterparty: Set(item.counterparty.clone()),
        category: Set(item.category.clone()),
        purpose: Set(item.purpose.clone()),
        amount: Set(item.amount),
    };
    active.update(conn()).await?;
    Ok(())
}

/// Статьи затрат удаляются физически
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
