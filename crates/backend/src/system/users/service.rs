use anyhow::Result;
use chrono::Utc;
use contracts::enums::ActorRole;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use uuid::Uuid;

use super::repository;
use crate::system::auth::password;

/// Create a new user account. Public signup is limited to the supply-chain
/// roles; admin accounts can only be created by an existing admin.
pub async fn create(
    dto: CreateUserDto,
    created_by: Option<String>,
    requester_is_admin: bool,
) -> Result<String> {
    if dto.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    if repository::get_by_username(&dto.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("Invalid email format"));
        }
    }

    if dto.role == ActorRole::Admin && !requester_is_admin {
        return Err(anyhow::anyhow!("Only admins can create admin accounts"));
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let user_id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username: dto.username,
        email: dto.email,
        full_name: dto.full_name,
        role: dto.role,
        is_active: true,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    repository::create_with_password(&user, &password_hash).await?;

    tracing::info!("User {} created with role {}", user.username, user.role);
    Ok(user_id)
}

pub async fn update(dto: UpdateUserDto) -> Result<()> {
    let mut user = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("Invalid email format"));
        }
    }

    user.email = dto.email;
    user.full_name = dto.full_name;
    user.role = dto.role;
    user.is_active = dto.is_active;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// Lookup by UUID, used by the transfer engine when custody moves to a
/// named account
pub async fn get_user(id: Uuid) -> Result<Option<User>> {
    repository::get_by_id(&id.to_string()).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Change a password. Admins may change anyone's; everyone else changes
/// their own and must present the old password.
pub async fn change_password(
    user_id: &str,
    dto: ChangePasswordDto,
    requester_id: &str,
) -> Result<()> {
    repository::get_by_id(user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Requester not found"))?;

    if user_id != requester_id {
        if requester.role != ActorRole::Admin {
            return Err(anyhow::anyhow!("Permission denied"));
        }
    } else {
        let old_password = dto
            .old_password
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Old password is required"))?;
        let current_hash = repository::get_password_hash(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;
        if !password::verify_password(old_password, &current_hash)? {
            return Err(anyhow::anyhow!("Invalid old password"));
        }
    }

    password::validate_password_strength(&dto.new_password)?;
    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(user_id, &new_hash).await?;

    Ok(())
}

/// Verify login credentials; returns None for unknown user or bad password
pub async fn verify_credentials(username: &str, password_input: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("User account is inactive"));
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password_input, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&user.id).await;

    Ok(Some(user))
}
