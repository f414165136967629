use super::repository;
use contracts::domain::a001_income_contract::aggregate::{
    IncomeContract, IncomeContractDto, IncomeContractOption,
};
use uuid::Uuid;

pub async fn create(dto: IncomeContractDto) -> anyhow::Result<Uuid> {
    let contract_number = dto
        .contract_number
        .ok_or_else(|| anyhow::anyhow!("Номер договора обязателен"))?;
    let contract_date = dto
        .contract_date
        .ok_or_else(|| anyhow::anyhow!("Дата договора обязательна"))?;
    let client = dto
        .client
        .ok_or_else(|| anyhow::anyhow!("Заказчик обязателен"))?;
    let contract_amount = dto
        .contract_amount
        .ok_or_else(|| anyhow::anyhow!("Сумма договора обязательна"))?;

    if repository::find_by_number(&contract_number).await?.is_some() {
        anyhow::bail!("Договор с номером {} уже существует", contract_number);
    }

    let mut aggregate = IncomeContract::new_for_insert(
        contract_number,
        contract_date,
        client,
        contract_amount,
        dto.paid_amount,
    );

    aggregate.validate().map_err(|e| anyhow::anyhow!(e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(id: Uuid, dto: IncomeContractDto) -> anyhow::Result<()> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Договор не найден"))?;

    if let Some(ref number) = dto.contract_number {
        if let Some(existing) = repository::find_by_number(number).await? {
            if existing.id != aggregate.id {
                anyhow::bail!("Договор с номером {} уже существует", number);
            }
        }
    }

    aggregate.update(&dto);

    aggregate.validate().map_err(|e| anyhow::anyhow!(e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<IncomeContract>> {
    repository::get_by_id(id).await
}

pub async fn list_active() -> anyhow::Result<Vec<IncomeContract>> {
    repository::list_active().await
}

/// Варианты для выпадающего списка источников финансирования:
/// только активные договоры
pub async fn list_funding_options() -> anyhow::Result<Vec<IncomeContractOption>> {
    let options = repository::list_active()
        .await?
        .into_iter()
        .filter(IncomeContract::is_active)
        .map(|c| IncomeContractOption {
            value: c.id.as_string(),
            label: format!("{} ({})", c.contract_number, c.client),
        })
        .collect();
    Ok(options)
}
