use super::repository;
use crate::domain::a002_expense_contract;
use contracts::domain::a003_cal_plan::aggregate::{CalPlan, SaveCalPlanDto};
use uuid::Uuid;

pub async fn list_by_contract(expense_contract_id: Uuid) -> anyhow::Result<Vec<CalPlan>> {
    repository::list_by_contract(expense_contract_id).await
}

/// Сохранение календарного плана: присланный набор строк целиком
/// замещает прежний план договора. Пустой набор очищает план.
pub async fn save_plan(expense_contract_id: Uuid, dto: SaveCalPlanDto) -> anyhow::Result<usize> {
    let contract = a002_expense_contract::repository::get_by_id(expense_contract_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Договор не найден"))?;
    if contract.metadata.is_deleted() {
        anyhow::bail!("Договор удалён");
    }

    let plans: Vec<CalPlan> = dto
        .plans
        .iter()
        .map(|entry| CalPlan::new_for_insert(contract.id, entry.date, Some(entry.amount)))
        .collect();

    repository::replace_for_contract(expense_contract_id, &plans).await?;
    Ok(plans.len())
}
