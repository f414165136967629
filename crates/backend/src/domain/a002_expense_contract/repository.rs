use chrono::Utc;
use contracts::domain::a001_income_contract::aggregate::IncomeContractId;
use contracts::domain::a002_expense_contract::aggregate::{ExpenseContract, ExpenseContractId};
use contracts::domain::common::EntityMetadata;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_expense_contract")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub contract_number: String,
    pub type_contract: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub name: String,
    pub client: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub contract_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub advance_percentage: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub payment_loesk: Option<Decimal>,
    pub income_contract_id: String,
    pub status: String,
    pub is_mes: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseContract {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            deleted_at: m.deleted_at,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let funding = Uuid::parse_str(&m.income_contract_id).unwrap_or_else(|_| Uuid::new_v4());

        ExpenseContract {
            id: ExpenseContractId(uuid),
            contract_number: m.contract_number,
            type_contract: m.type_contract,
            start_date: m.start_date,
            end_date: m.end_date,
            name: m.name,
            client: m.client,
            contract_amount: m.contract_amount,
            advance_percentage: m.advance_percentage,
            payment_loesk: m.payment_loesk,
            income_contract_id: IncomeContractId(funding),
            status: m.status,
            is_mes: m.is_mes,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_active() -> anyhow::Result<Vec<ExpenseContract>> {
    let mut items: Vec<ExpenseContract> = Entity::find()
        .filter(Column::DeletedAt.is_null())
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| a.contract_number.cmp(&b.contract_number))
    });
    Ok(items)
}

/// Неудалённые расходные договоры указанного источника финансирования
pub async fn list_by_funding_source(
    income_contract_id: Uuid,
) -> anyhow::Result<Vec<ExpenseContract>> {
    let items = Entity::find()
        .filter(Column::IncomeContractId.eq(income_contract_id.to_string()))
        .filter(Column::DeletedAt.is_null())
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ExpenseContract>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Поиск по номеру для проверки уникальности, включая мягко удалённые
pub async fn find_by_number(contract_number: &str) -> anyhow::Result<Option<ExpenseContract>> {
    let result = Entity::find()
        .filter(Column::ContractNumber.eq(contract_number))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &ExpenseContract) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        contract_number: Set(aggregate.contract_number.clone()),
        type_contract: Set(aggregate.type_contract.clone()),
        start_date: Set(aggregate.start_date),
        end_date: Set(aggregate.end_date),
        name: Set(aggregate.name.clone()),
        client: Set(aggregate.client.clone()),
        contract_amount: Set(aggregate.contract_amount),
        advance_percentage: Set(aggregate.advance_percentage),
        payment_loesk: Set(aggregate.payment_loesk),
        income_contract_id: Set(aggregate.income_contract_id.as_string()),
        status: Set(aggregate.status.clone()),
        is_mes: Set(aggregate.is_mes),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        deleted_at: Set(aggregate.metadata.deleted_at),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &ExpenseContract) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        contract_number: Set(aggregate.contract_number.clone()),
        type_contract: Set(aggregate.type_contract.clone()),
        start_date: Set(aggregate.start_date),
        end_date: Set(aggregate.end_date),
        name: Set(aggregate.name.clone()),
        client: Set(aggregate.client.clone()),
        contract_amount: Set(aggregate.contract_amount),
        advance_percentage: Set(aggregate.advance_percentage),
        payment_loesk: Set(aggregate.payment_loesk),
        income_contract_id: Set(aggregate.income_contract_id.as_string()),
        status: Set(aggregate.status.clone()),
        is_mes: Set(aggregate.is_mes),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        deleted_at: Set(aggregate.metadata.deleted_at),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let now = Utc::now();
    let result = Entity::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::DeletedAt.is_null())
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
