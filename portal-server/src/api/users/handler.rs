//! User API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::auth::permissions::{ROLES, is_valid_role};
use crate::core::ServerState;
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{UserCreate, UserInfo};

/// GET /api/users - 获取所有账号
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let users = UserRepository::new(state.get_db()).find_all().await?;
    Ok(Json(users.iter().map(|u| u.to_info()).collect()))
}

/// POST /api/users - 创建账号
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(mut payload): Json<UserCreate>,
) -> AppResult<Json<UserInfo>> {
    payload.username = payload.username.trim().to_string();
    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;
    if !is_valid_role(&payload.role) {
        return Err(AppError::validation(format!(
            "Invalid role '{}', expected one of: {}",
            payload.role,
            ROLES.join(", ")
        ))
        .with_detail("field", "role"));
    }

    let username = payload.username.clone();
    let user = UserRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::UsernameExists)
                .with_detail("username", username.clone()),
            other => other.into(),
        })?;

    tracing::info!(
        operator = %current_user.username,
        username = %user.username,
        role = %user.role,
        "User created"
    );
    Ok(Json(user.to_info()))
}

/// DELETE /api/users/:id - 删除账号 (不能删除最后一个管理员)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", id.clone()))?;

    if user.is_admin() && repo.count_admins().await? <= 1 {
        return Err(AppError::with_message(
            ErrorCode::CannotDeleteAdmin,
            "Cannot delete the last admin account",
        ));
    }

    let deleted = repo.delete(&id).await?;
    if deleted {
        tracing::info!(
            operator = %current_user.username,
            username = %user.username,
            "User deleted"
        );
    }
    Ok(Json(deleted))
}
