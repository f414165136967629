use super::repository;
use crate::domain::a001_income_contract;
use contracts::domain::a001_income_contract::aggregate::IncomeContractId;
use contracts::domain::a002_expense_contract::aggregate::{ExpenseContract, ExpenseContractDto};
use uuid::Uuid;

/// Источником финансирования может быть только активный неудалённый
/// доходный договор
async fn resolve_funding_source(raw_id: &str) -> anyhow::Result<IncomeContractId> {
    let id = Uuid::parse_str(raw_id)
        .map_err(|_| anyhow::anyhow!("Некорректный источник финансирования"))?;
    let income = a001_income_contract::repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Источник финансирования не найден"))?;
    if !income.is_active() {
        anyhow::bail!(
            "Договор {} недоступен как источник финансирования",
            income.contract_number
        );
    }
    Ok(income.id)
}

pub async fn create(dto: ExpenseContractDto) -> anyhow::Result<Uuid> {
    let contract_number = dto
        .contract_number
        .ok_or_else(|| anyhow::anyhow!("Номер договора обязателен"))?;
    let type_contract = dto
        .type_contract
        .ok_or_else(|| anyhow::anyhow!("Тип договора обязателен"))?;
    let start_date = dto
        .start_date
        .ok_or_else(|| anyhow::anyhow!("Дата начала обязательна"))?;
    let end_date = dto
        .end_date
        .ok_or_else(|| anyhow::anyhow!("Дата окончания обязательна"))?;
    let name = dto
        .name
        .ok_or_else(|| anyhow::anyhow!("Наименование обязательно"))?;
    let client = dto
        .client
        .ok_or_else(|| anyhow::anyhow!("Контрагент обязателен"))?;
    let contract_amount = dto
        .contract_amount
        .ok_or_else(|| anyhow::anyhow!("Сумма договора обязательна"))?;
    let funding_raw = dto
        .income_contract_id
        .ok_or_else(|| anyhow::anyhow!("Источник финансирования обязателен"))?;

    if repository::find_by_number(&contract_number).await?.is_some() {
        anyhow::bail!("Договор с номером {} уже существует", contract_number);
    }

    let funding = resolve_funding_source(&funding_raw).await?;

    let mut aggregate = ExpenseContract::new_for_insert(
        contract_number,
        type_contract,
        start_date,
        end_date,
        name,
        client,
        contract_amount,
        dto.advance_percentage,
        funding,
        dto.is_mes.unwrap_or(false),
    );
    if let Some(payment) = dto.payment_loesk {
        aggregate.payment_loesk = Some(payment);
    }

    aggregate.validate().map_err(|e| anyhow::anyhow!(e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(id: Uuid, dto: ExpenseContractDto) -> anyhow::Result<()> {
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

    // Смена источника финансирования проходит ту же проверку, что и создание
    if let Some(ref funding_raw) = dto.income_contract_id {
        aggregate.income_contract_id = resolve_funding_source(funding_raw).await?;
    }

    aggregate.update(&dto);

    aggregate.validate().map_err(|e| anyhow::anyhow!(e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ExpenseContract>> {
    repository::get_by_id(id).await
}

pub async fn list_active() -> anyhow::Result<Vec<ExpenseContract>> {
    repository::list_active().await
}
