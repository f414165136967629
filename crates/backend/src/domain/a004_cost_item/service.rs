use super::repository;
use crate::domain::a002_expense_contract;
use contracts::domain::a004_cost_item::aggregate::{CostItem, CostItemDto};
use uuid::Uuid;

pub async fn create(expense_contract_id: Uuid, dto: CostItemDto) -> anyhow::Result<Uuid> {
    let contract = a002_expense_contract::repository::get_by_id(expense_contract_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Договор не найден"))?;
    if contract.metadata.is_deleted() {
        anyhow::bail!("Договор удалён");
    }

    let date = dto.date.ok_or_else(|| anyhow::anyhow!("Дата обязательна"))?;
    let counterparty = dto
        .counterparty
        .ok_or_else(|| anyhow::anyhow!("Контрагент обязателен"))?;
    let category = dto
        .category
        .ok_or_else(|| anyhow::anyhow!("Категория обязательна"))?;
    let purpose = dto
        .purpose
        .ok_or_else(|| anyhow::anyhow!("Назначение платежа обязательно"))?;
    let amount = dto
        .amount
        .ok_or_else(|| anyhow::anyhow!("Сумма обязательна"))?;

    let item = CostItem::new_for_insert(contract.id, date, counterparty, category, purpose, amount);
    repository::insert(&item).await
}

pub async fn update(id: Uuid, dto: CostItemDto) -> anyhow::Result<()> {
    let mut item = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Статья затрат не найдена"))?;

    if let Some(date) = dto.date {
        item.date = date;
    }
    if let Some(counterparty) = dto.counterparty {
        item.counterparty = counterparty;
    }
    if let Some(category) = dto.category {
        item.category = category;
    }
    if let Some(purpose) = dto.purpose {
        item.purpose = purpose;
    }
    if let Some(amount) = dto.amount {
        item.amount = amount;
    }

    repository::update(&item).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::delete(id).await
}

pub async fn list_by_contract(expense_contract_id: Uuid) -> anyhow::Result<Vec<CostItem>> {
    repository::list_by_contract(expense_contract_id).await
}
