use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{
    ChangePasswordDto, CreateUserDto, UpdateUserDto, User, ADMIN_ROLE, ALLOWED_ROLES,
};

use super::repository;
use crate::system::auth::password;

fn validate_role(role: &str) -> Result<()> {
    if !ALLOWED_ROLES.contains(&role) {
        return Err(anyhow::anyhow!("Недопустимая роль: {}", role));
    }
    Ok(())
}

/// Create a new user
pub async fn create(dto: CreateUserDto, created_by: Option<String>) -> Result<String> {
    if dto.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Имя пользователя не может быть пустым"));
    }

    if repository::get_by_username(&dto.username).await?.is_some() {
        return Err(anyhow::anyhow!("Пользователь с таким именем уже существует"));
    }

    validate_role(&dto.role)?;
    password::validate_password_strength(&dto.password)?;

    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    // Роль администратора всегда даёт админские права
    let is_admin = dto.is_admin || dto.role == ADMIN_ROLE;

    let user = User {
        id: user_id.clone(),
        username: dto.username,
        full_name: dto.full_name,
        role: dto.role,
        is_active: true,
        is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user_id)
}

/// Update user
pub async fn update(dto: UpdateUserDto) -> Result<()> {
    let mut user = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Пользователь не найден"))?;

    if let Some(ref role) = dto.role {
        validate_role(role)?;
        user.role = role.clone();
    }

    user.full_name = dto.full_name;
    user.is_active = dto.is_active;
    user.is_admin = dto.is_admin || user.role == ADMIN_ROLE;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

/// Delete user
pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// List all users
pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Change user password
pub async fn change_password(dto: ChangePasswordDto, requester_id: &str) -> Result<()> {
    let _user = repository::get_by_id(&dto.user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Пользователь не найден"))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Пользователь не найден"))?;

    if dto.user_id != requester_id {
        // Чужой пароль меняет только администратор, без старого пароля
        if !requester.is_admin {
            return Err(anyhow::anyhow!("Недостаточно прав"));
        }
    } else if let Some(ref old_password) = dto.old_password {
        let current_hash = repository::get_password_hash(&dto.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

        if !password::verify_password(old_password, &current_hash)? {
            return Err(anyhow::anyhow!("Неверный старый пароль"));
        }
    }

    password::validate_password_strength(&dto.new_password)?;

    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(&dto.user_id, &new_hash).await?;

    Ok(())
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("Учётная запись отключена"));
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&user.id).await;

    Ok(Some(user))
}
