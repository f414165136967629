use chrono::Utc;
use contracts::domain::a001_income_contract::aggregate::{IncomeContract, IncomeContractId};
use contracts::domain::common::EntityMetadata;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_income_contract")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub contract_number: String,
    pub contract_date: chrono::NaiveDate,
    pub client: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub contract_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub paid_amount: Option<Decimal>,
    pub status: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for IncomeContract {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            deleted_at: m.deleted_at,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        IncomeContract {
            id: IncomeContractId(uuid),
            contract_number: m.contract_number,
            contract_date: m.contract_date,
            client: m.client,
            contract_amount: m.contract_amount,
            paid_amount: m.paid_amount,
            status: m.status,
            metadata,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Все неудалённые договоры, свежие сверху
pub async fn list_active() -> anyhow::Result<Vec<IncomeContract>> {
    let mut items: Vec<IncomeContract> = Entity::find()
        .filter(Column::DeletedAt.is_null())
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        b.contract_date
            .cmp(&a.contract_date)
            .then_with(|| a.contract_number.cmp(&b.contract_number))
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<IncomeContract>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Поиск по номеру для проверки уникальности. Мягко удалённые записи
/// тоже учитываются: их номера нельзя использовать повторно
pub async fn find_by_number(contract_number: &str) -> anyhow::Result<Option<IncomeContract>> {
    let result = Entity::find()
        .filter(Column::ContractNumber.eq(contract_number))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &IncomeContract) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        contract_number: Set(aggregate.contract_number.clone()),
        contract_date: Set(aggregate.contract_date),
        client: Set(aggregate.client.clone()),
        contract_amount: Set(aggregate.contract_amount),
        paid_amount: Set(aggregate.paid_amount),
        status: Set(aggregate.status.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        deleted_at: Set(aggregate.metadata.deleted_at),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &IncomeContract) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        contract_number: Set(aggregate.contract_number.clone()),
        contract_date: Set(aggregate.contract_date),
        client: Set(aggregate.client.clone()),
        contract_amount: Set(aggregate.contract_amount),
        paid_amount: Set(aggregate.paid_amount),
        status: Set(aggregate.status.clone()),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        deleted_at: Set(aggregate.metadata.deleted_at),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

/// Мягкое удаление: договор исчезает из списков, но остаётся в базе
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
