//! Public Registration Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::WebsiteSettingsRepository;
use crate::services::registration;
use crate::utils::AppResult;
use shared::models::{CompanyName, RegistrationReceipt, RegistrationRequest};

/// POST /api/pre-register - 提交报名
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegistrationRequest>,
) -> AppResult<Json<RegistrationReceipt>> {
    let receipt = registration::register(&state, payload).await?;
    Ok(Json(receipt))
}

/// GET /api/pre-register/:id - 报名回执
pub async fn receipt(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<RegistrationReceipt>> {
    Ok(Json(registration::receipt(&state, &id).await?))
}

/// GET /api/pre-register/by-code/:code - 报名码自动填充
pub async fn lookup_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<CompanyName>> {
    let settings = WebsiteSettingsRepository::new(state.get_db())
        .get_or_create()
        .await?;
    let entry = registration::lookup_code(&state, settings.codes_active, &code).await?;
    Ok(Json(entry))
}
