use axum::{
    extract::{Multipart, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::domain::a005_closed_work::{self, service::Attachment};
use contracts::domain::a005_closed_work::aggregate::ClosedWorkView;

/// Разобранная multipart-форма акта: текстовые поля + необязательный PDF
#[derive(Default)]
struct ActForm {
    act_number: Option<String>,
    act_date: Option<NaiveDate>,
    amount: Option<Decimal>,
    attachment: Option<Attachment>,
}

async fn parse_act_form(mut multipart: Multipart) -> anyhow::Result<ActForm> {
    let mut form = ActForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "act_number" => form.act_number = Some(field.text().await?),
            "act_date" => {
                let raw = field.text().await?;
                let date = raw
                    .parse::<NaiveDate>()
                    .map_err(|_| anyhow::anyhow!("Некорректная дата акта: {}", raw))?;
                form.act_date = Some(date);
            }
            "amount" => {
                let raw = field.text().await?;
                let amount = raw
                    .parse::<Decimal>()
                    .map_err(|_| anyhow::anyhow!("Некорректная сумма: {}", raw))?;
                form.amount = Some(amount);
            }
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                // Пустое файловое поле в форме без выбранного файла
                if let Some(file_name) = file_name.filter(|n| !n.is_empty()) {
                    if !data.is_empty() {
                        form.attachment = Some(Attachment {
                            file_name,
                            data: data.to_vec(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// GET /api/expense-contracts/:id/closed-works
pub async fn list_by_contract(
    Path(id): Path<String>,
) -> Result<Json<Vec<ClosedWorkView>>, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a005_closed_work::service::list_by_contract(uuid).await {
        Ok(works) => Ok(Json(works.iter().map(ClosedWorkView::from).collect())),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/expense-contracts/:id/closed-works (multipart/form-data)
pub async fn create(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;

    let form = parse_act_form(multipart).await.map_err(bad_request)?;

    let act_number = form
        .act_number
        .ok_or_else(|| bad_request(anyhow::anyhow!("Номер акта обязателен")))?;
    let act_date = form
        .act_date
        .ok_or_else(|| bad_request(anyhow::anyhow!("Дата акта обязательна")))?;
    let amount = form
        .amount
        .ok_or_else(|| bad_request(anyhow::anyhow!("Сумма акта обязательна")))?;

    match a005_closed_work::service::create(uuid, act_number, act_date, amount, form.attachment)
        .await
    {
        Ok(work_id) => Ok(Json(json!({ "id": work_id.to_string() }))),
        Err(e) => Err(bad_request(e)),
    }
}

/// PUT /api/closed-works/:id (multipart/form-data)
pub async fn update(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Некорректный идентификатор" })),
        )
    })?;

    let form = parse_act_form(multipart).await.map_err(bad_request)?;

    match a005_closed_work::service::update(
        uuid,
        form.act_number,
        form.act_date,
        form.amount,
        form.attachment,
    )
    .await
    {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(bad_request(e)),
    }
}

/// DELETE /api/closed-works/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a005_closed_work::service::delete(uuid).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[derive(Deserialize, Default)]
pub struct FileQuery {
    #[serde(default)]
    download: Option<String>,
}

/// GET /api/closed-works/:id/file
///
/// По умолчанию PDF отдаётся inline для просмотра в браузере,
/// с ?download=1 отдаётся как attachment
pub async fn download_file(
    Path(id): Path<String>,
    Query(query): Query<FileQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let (path, original_name) = a005_closed_work::service::attachment_path(uuid)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let data = tokio::fs::read(&path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let disposition = if query.download.as_deref() == Some("1") {
        "attachment"
    } else {
        "inline"
    };

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "{}; filename=\"{}\"",
                disposition,
                original_name.replace('"', "")
            ),
        ),
    ];

    Ok((headers, data))
}

fn bad_request(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": e.to_string() })),
    )
}
