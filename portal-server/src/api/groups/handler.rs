//! Group API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::GroupRepository;
use crate::services::registration::{group_view, group_views, load_group};
use crate::utils::time::{format_date, parse_date, parse_slot_time};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::event::EventKind;
use shared::models::{Group, GroupCreate, GroupUpdate, GroupView, weekday_name};
use shared::util::now_millis;

/// Validate a group and normalise its derived fields (`date`, `day`)
fn normalize_group(group: &mut Group) -> AppResult<()> {
    group.name = group.name.trim().to_string();
    validate_required_text(&group.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&group.date, "date", MAX_NAME_LEN)?;
    validate_required_text(&group.time_from, "time_from", MAX_NAME_LEN)?;
    validate_required_text(&group.time_to, "time_to", MAX_NAME_LEN)?;

    let date = parse_date(&group.date)?;
    let from = parse_slot_time(&group.time_from)?;
    let to = parse_slot_time(&group.time_to)?;
    if from >= to {
        return Err(AppError::with_message(
            ErrorCode::GroupInvalidTimeRange,
            "time_from must be earlier than time_to",
        )
        .with_detail("time_from", group.time_from.clone())
        .with_detail("time_to", group.time_to.clone()));
    }

    group.date = format_date(date);
    group.time_from = from.format("%H:%M").to_string();
    group.time_to = to.format("%H:%M").to_string();
    group.day = weekday_name(date).to_string();
    Ok(())
}

/// GET /api/groups/public - 今天及以后、仍有名额的分组
pub async fn list_public(State(state): State<ServerState>) -> AppResult<Json<Vec<GroupView>>> {
    let views = upcoming(&state).await?;
    Ok(Json(views.into_iter().filter(|v| !v.is_full).collect()))
}

/// GET /api/groups/public/all - 今天及以后的全部分组
pub async fn list_public_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<GroupView>>> {
    Ok(Json(upcoming(&state).await?))
}

async fn upcoming(state: &ServerState) -> AppResult<Vec<GroupView>> {
    let today = format_date(state.business_today());
    let groups = GroupRepository::new(state.get_db())
        .find_from_date(&today)
        .await?;
    group_views(state, groups).await
}

/// GET /api/groups - 获取所有分组
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<GroupView>>> {
    let groups = GroupRepository::new(state.get_db()).find_all().await?;
    Ok(Json(group_views(&state, groups).await?))
}

/// GET /api/groups/:id - 获取单个分组
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<GroupView>> {
    let group = load_group(&state, &id).await?;
    Ok(Json(group_view(&state, group).await?))
}

/// POST /api/groups - 创建分组
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<GroupCreate>,
) -> AppResult<Json<GroupView>> {
    let mut group = Group {
        id: None,
        name: payload.name,
        date: payload.date,
        time_from: payload.time_from,
        time_to: payload.time_to,
        day: String::new(),
        max_companies: payload.max_companies.unwrap_or(0),
        created_at: now_millis(),
    };
    normalize_group(&mut group)?;

    let group = GroupRepository::new(state.get_db()).create(group).await?;
    tracing::info!(
        operator = %current_user.username,
        group = %group.name,
        date = %group.date,
        max_companies = group.max_companies,
        "Group created"
    );
    state.notify(EventKind::GroupsChanged);

    Ok(Json(GroupView::new(group, 0)))
}

/// PUT /api/groups/:id - 更新分组
///
/// 允许把 max_companies 调低到当前人数以下 (分组变为已满)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<GroupUpdate>,
) -> AppResult<Json<GroupView>> {
    let mut group = load_group(&state, &id).await?;
    if let Some(name) = payload.name {
        group.name = name;
    }
    if let Some(date) = payload.date {
        group.date = date;
    }
    if let Some(time_from) = payload.time_from {
        group.time_from = time_from;
    }
    if let Some(time_to) = payload.time_to {
        group.time_to = time_to;
    }
    if let Some(max) = payload.max_companies {
        group.max_companies = max;
    }
    normalize_group(&mut group)?;

    let group = GroupRepository::new(state.get_db())
        .replace(&id, group)
        .await?;
    tracing::info!(operator = %current_user.username, group = %group.name, "Group updated");
    state.notify(EventKind::GroupsChanged);

    Ok(Json(group_view(&state, group).await?))
}

/// DELETE /api/groups/:id - 删除分组 (不级联删除公司)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let group = load_group(&state, &id).await?;
    let deleted = GroupRepository::new(state.get_db()).delete(&id).await?;

    if deleted {
        if let Some(group_id) = group.id.as_deref() {
            state.group_locks.remove(group_id);
        }
        tracing::info!(operator = %current_user.username, group = %group.name, "Group deleted");
        state.notify(EventKind::GroupsChanged);
        state.notify(EventKind::CompaniesChanged);
    }
    Ok(Json(deleted))
}
