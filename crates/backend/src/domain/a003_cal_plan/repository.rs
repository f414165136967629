use contracts::domain::a002_expense_contract::aggregate::ExpenseContractId;
use contracts::domain::a003_cal_plan::aggregate::{CalPlan, CalPlanId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_cal_plan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub expense_contract_id: String,
    pub date: chrono::NaiveDate,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub amount: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CalPlan {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let contract = Uuid::parse_str(&m.expense_contract_id).unwrap_or_else(|_| Uuid::new_v4());
        CalPlan {
            id: CalPlanId(uuid),
            expense_contract_id: ExpenseContractId(contract),
            date: m.date,
            amount: m.amount,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_by_contract(expense_contract_id: Uuid) -> anyhow::Result<Vec<CalPlan>> {
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

pub async fn list_all() -> anyhow::Result<Vec<CalPlan>> {
    let items = Entity::find()
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Полная замена плана договора: старые строки удаляются и вставляются
/// новые в одной транзакции, чтобы сбой не оставил план наполовину пустым
pub async fn replace_for_contract(
    expense_contract_id: Uuid,
    plans: &[CalPlan],
) -> anyhow::Result<()> {
    let txn = conn().begin().await?;

    Entity::delete_many()
        .filter(Column::ExpenseContractId.eq(expense_contract_id.to_string()))
        .exec(&txn)
        .await?;

    for plan in plans {
        let active = ActiveModel {
            id: Set(plan.id.as_string()),
            expense_contract_id: Set(plan.expense_contract_id.as_string()),
            date: Set(plan.date),
            amount: Set(plan.amount),
        };
        active.insert(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}
