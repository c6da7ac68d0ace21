//! Company API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::group::TABLE as GROUP_TABLE;
use crate::db::repository::{CompanyRepository, GroupRepository, record_key};
use crate::services::registration;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::event::EventKind;
use shared::models::{
    BulkDeleteRequest, BulkDeleteResponse, Company, CompanyCreate, CompanyFilter,
    CompanyStatusUpdate, CompanyUpdate, NO_GROUP, QueueEntry,
};

/// GET /api/companies/public-queue - 公开排队列表 (按报名时间)
pub async fn public_queue(State(state): State<ServerState>) -> AppResult<Json<Vec<QueueEntry>>> {
    let companies = CompanyRepository::new(state.get_db()).find_all().await?;
    let group_names: HashMap<String, String> = GroupRepository::new(state.get_db())
        .find_all()
        .await?
        .into_iter()
        .filter_map(|g| g.id.map(|id| (id, g.name)))
        .collect();

    let queue = companies
        .into_iter()
        .enumerate()
        .map(|(index, c)| QueueEntry {
            position: index + 1,
            group_name: c
                .group_id
                .as_ref()
                .and_then(|id| group_names.get(id))
                .cloned()
                .unwrap_or_else(|| NO_GROUP.to_string()),
            name: c.name,
            paid: c.paid,
            spent: c.spent,
        })
        .collect();

    Ok(Json(queue))
}

/// GET /api/companies - 获取公司列表
pub async fn list(
    State(state): State<ServerState>,
    Query(mut filter): Query<CompanyFilter>,
) -> AppResult<Json<Vec<Company>>> {
    // group_id 可以是 "company_group:xxx" 或裸 key
    filter.group_id = filter
        .group_id
        .as_deref()
        .map(|id| record_key(GROUP_TABLE, id.trim()));
    let companies = CompanyRepository::new(state.get_db()).find_all().await?;
    Ok(Json(
        companies.into_iter().filter(|c| filter.matches(c)).collect(),
    ))
}

/// GET /api/companies/:id - 获取单个公司
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound).with_detail("id", id))?;
    Ok(Json(company))
}

/// POST /api/companies - 管理端新增公司
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CompanyCreate>,
) -> AppResult<Json<Company>> {
    let company = registration::admin_create(&state, payload).await?;
    tracing::info!(
        operator = %current_user.username,
        company = %company.name,
        "Company created by admin"
    );
    Ok(Json(company))
}

/// PUT /api/companies/:id - 修改公司 (调组时重新检查名额)
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CompanyUpdate>,
) -> AppResult<Json<Company>> {
    let company = registration::admin_update(&state, &id, payload).await?;
    tracing::info!(
        operator = %current_user.username,
        company = %company.name,
        "Company updated"
    );
    Ok(Json(company))
}

/// PATCH /api/companies/:id/status - 付款 / 消费状态
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CompanyStatusUpdate>,
) -> AppResult<Json<Company>> {
    let company = registration::update_status(&state, &id, payload).await?;
    tracing::debug!(operator = %current_user.username, company = %company.name, "Status toggled");
    Ok(Json(company))
}

/// DELETE /api/companies/:id - 删除公司
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = CompanyRepository::new(state.get_db()).delete(&id).await?;
    if deleted {
        tracing::info!(operator = %current_user.username, id = %id, "Company deleted");
        state.notify(EventKind::CompaniesChanged);
        state.notify(EventKind::GroupsChanged);
    }
    Ok(Json(deleted))
}

/// POST /api/companies/bulk-delete - 批量删除
pub async fn bulk_delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    if payload.ids.is_empty() {
        return Err(AppError::required_field("ids"));
    }

    let deleted = CompanyRepository::new(state.get_db())
        .delete_many(&payload.ids)
        .await?;

    tracing::info!(
        operator = %current_user.username,
        requested = payload.ids.len(),
        deleted,
        "Companies bulk deleted"
    );
    if deleted > 0 {
        state.notify(EventKind::CompaniesChanged);
        state.notify(EventKind::GroupsChanged);
    }
    Ok(Json(BulkDeleteResponse { deleted }))
}
