//! Authentication Handlers
//!
//! Handles login and current-user lookup

use std::time::Duration;

use axum::{Json, extract::State};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::permissions::get_default_permissions;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use shared::models::{CurrentUserResponse, LoginRequest, LoginResponse};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.trim().to_string();
    let user = UserRepository::new(state.get_db())
        .find_by_username(&username)
        .await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = username.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }
            u
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.clone().unwrap_or_default();
    let permissions = get_default_permissions(&user.role);

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.username, &user.role, &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %user.username,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.to_info(),
    }))
}

/// Get current user info
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    // 账号可能在令牌签发后被删除
    let user = UserRepository::new(state.get_db())
        .find_by_id(&current.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    Ok(Json(CurrentUserResponse {
        id: current.id,
        username: user.username,
        display_name: user.display_name,
        role: user.role,
        permissions: current.permissions,
    }))
}
