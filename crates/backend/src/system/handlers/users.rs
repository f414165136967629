use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use serde_json::{json, Value};

use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// Управление пользователями доступно только администратору
/// (маршруты закрыты require_admin)
pub async fn list_users() -> Result<Json<Vec<User>>, StatusCode> {
    let users = service::list_all()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(users))
}

pub async fn create_user(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match service::create(dto, Some(claims.sub)).await {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn update_user(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    dto.id = id;
    match service::update(dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn delete_user(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    // Администратор не может удалить сам себя
    if claims.sub == id {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Нельзя удалить собственную учётную запись" })),
        ));
    }

    match service::delete(&id).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Пользователь не найден" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    match service::change_password(dto, &claims.sub).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
