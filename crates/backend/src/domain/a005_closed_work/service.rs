use super::repository;
use crate::domain::a002_expense_contract;
use crate::shared::data::file_storage;
use chrono::{NaiveDate, Utc};
use contracts::domain::a005_closed_work::aggregate::ClosedWork;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Загруженное вложение акта (оригинальное имя + содержимое)
pub struct Attachment {
    pub file_name: String,
    pub data: Vec<u8>,
}

pub async fn create(
    expense_contract_id: Uuid,
    act_number: String,
    act_date: NaiveDate,
    amount: Decimal,
    attachment: Option<Attachment>,
) -> anyhow::Result<Uuid> {
    let contract = a002_expense_contract::repository::get_by_id(expense_contract_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Договор не найден"))?;
    if contract.metadata.is_deleted() {
        anyhow::bail!("Договор удалён");
    }
    if act_number.trim().is_empty() {
        anyhow::bail!("Номер акта не может быть пустым");
    }

    let mut work = ClosedWork::new_for_insert(contract.id, act_number, act_date, amount);
    if let Some(att) = attachment {
        let stored = file_storage::save_file(&att.file_name, &att.data)?;
        work.file_name = Some(att.file_name);
        work.file_path = Some(stored);
    }

    repository::insert(&work).await
}

pub async fn update(
    id: Uuid,
    act_number: Option<String>,
    act_date: Option<NaiveDate>,
    amount: Option<Decimal>,
    attachment: Option<Attachment>,
) -> anyhow::Result<()> {
    let mut work = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Акт не найден"))?;

    if let Some(number) = act_number {
        if number.trim().is_empty() {
            anyhow::bail!("Номер акта не может быть пустым");
        }
        work.act_number = number;
    }
    if let Some(date) = act_date {
        work.act_date = date;
    }
    if let Some(amount) = amount {
        work.amount = amount;
    }

    // Новое вложение замещает старое, прежний файл убирается из хранилища
    if let Some(att) = attachment {
        let stored = file_storage::save_file(&att.file_name, &att.data)?;
        if let Some(ref old) = work.file_path {
            file_storage::delete_file(old)?;
        }
        work.file_name = Some(att.file_name);
        work.file_path = Some(stored);
    }

    work.updated_at = Utc::now();
    repository::update(&work).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let Some(work) = repository::get_by_id(id).await? else {
        return Ok(false);
    };
    if let Some(ref stored) = work.file_path {
        file_storage::delete_file(stored)?;
    }
    repository::delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ClosedWork>> {
    repository::get_by_id(id).await
}

pub async fn list_by_contract(expense_contract_id: Uuid) -> anyhow::Result<Vec<ClosedWork>> {
    repository::list_by_contract(expense_contract_id).await
}

/// Абсолютный путь вложения для отдачи файла
pub async fn attachment_path(id: Uuid) -> anyhow::Result<Option<(std::path::PathBuf, String)>> {
    let Some(work) = repository::get_by_id(id).await? else {
        return Ok(None);
    };
    let (Some(stored), Some(original)) = (work.file_path, work.file_name) else {
        return Ok(None);
    };
    let path = file_storage::file_path(&stored)?;
    Ok(Some((path, original)))
}
