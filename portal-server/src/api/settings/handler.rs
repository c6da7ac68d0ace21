//! Website Settings API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::WebsiteSettingsRepository;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use shared::event::EventKind;
use shared::gate::{self, GateStatus};
use shared::models::{WebsiteSettings, WebsiteSettingsUpdate};

/// GET /api/settings/website - 获取站点设置 (首次访问时创建默认值)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<WebsiteSettings>> {
    let settings = WebsiteSettingsRepository::new(state.get_db())
        .get_or_create()
        .await?;
    Ok(Json(settings))
}

/// GET /api/settings/website/status - 当前报名窗口状态
pub async fn status(State(state): State<ServerState>) -> AppResult<Json<GateStatus>> {
    let settings = WebsiteSettingsRepository::new(state.get_db())
        .get_or_create()
        .await?;
    Ok(Json(gate::evaluate(&settings, state.business_now())))
}

/// PUT /api/settings/website - 更新站点设置
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<WebsiteSettingsUpdate>,
) -> AppResult<Json<WebsiteSettings>> {
    validate_optional_text(&payload.open_time, "open_time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.close_time, "close_time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.message, "message", MAX_NOTE_LEN)?;
    validate_optional_text(
        &payload.post_registration_message,
        "post_registration_message",
        MAX_NOTE_LEN,
    )?;

    let settings = WebsiteSettingsRepository::new(state.get_db())
        .update(payload)
        .await?;

    tracing::info!(
        operator = %current_user.username,
        is_open = settings.is_open,
        auto_schedule = settings.auto_schedule,
        open_time = %settings.open_time,
        close_time = %settings.close_time,
        "Website settings updated"
    );
    state.notify(EventKind::SettingsChanged);

    Ok(Json(settings))
}
