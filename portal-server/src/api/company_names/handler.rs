//! Company Name Directory Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{CompanyNameRepository, CompanyRepository, RepoError};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    CompanyName, CompanyNameCreate, CompanyNameImport, CompanyNameUpdate, ImportSummary,
    normalize_code, normalize_name,
};

/// Duplicate code → CompanyNameCodeExists
fn map_code_conflict(code: &str) -> impl FnOnce(RepoError) -> AppError + '_ {
    move |e| match e {
        RepoError::Duplicate(_) => {
            AppError::new(ErrorCode::CompanyNameCodeExists)
                .with_detail("code", normalize_code(code))
        }
        other => other.into(),
    }
}

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::CompanyNameNotFound).with_detail("id", id)
}

/// GET /api/company-names
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CompanyName>>> {
    let names = CompanyNameRepository::new(state.get_db()).find_all().await?;
    Ok(Json(names))
}

/// GET /api/company-names/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CompanyName>> {
    let entry = CompanyNameRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(entry))
}

/// GET /api/company-names/unregistered - 名录中尚未报名的公司
pub async fn unregistered(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<CompanyName>>> {
    let registered: HashSet<String> = CompanyRepository::new(state.get_db())
        .find_all()
        .await?
        .iter()
        .map(|c| normalize_name(&c.name))
        .collect();

    let names = CompanyNameRepository::new(state.get_db()).find_all().await?;
    Ok(Json(
        names
            .into_iter()
            .filter(|n| !registered.contains(&normalize_name(&n.name)))
            .collect(),
    ))
}

/// POST /api/company-names
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CompanyNameCreate>,
) -> AppResult<Json<CompanyName>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.code, "code", MAX_SHORT_TEXT_LEN)?;

    let code = payload.code.clone();
    let entry = CompanyNameRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(map_code_conflict(&code))?;

    tracing::info!(operator = %current_user.username, code = %entry.code, "Company name created");
    Ok(Json(entry))
}

/// PUT /api/company-names/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CompanyNameUpdate>,
) -> AppResult<Json<CompanyName>> {
    let repo = CompanyNameRepository::new(state.get_db());
    let mut entry = repo.find_by_id(&id).await?.ok_or_else(|| not_found(&id))?;

    if let Some(name) = payload.name {
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        entry.name = name.trim().to_string();
    }
    if let Some(code) = payload.code {
        validate_required_text(&code, "code", MAX_SHORT_TEXT_LEN)?;
        entry.code = code;
    }
    if let Some(contact) = payload.contact_name {
        entry.contact_name = contact.trim().to_string();
    }
    if let Some(mobile) = payload.mobile_number {
        entry.mobile_number = mobile.trim().to_string();
    }

    let code = entry.code.clone();
    let entry = repo
        .replace(&id, entry)
        .await
        .map_err(map_code_conflict(&code))?;

    tracing::info!(operator = %current_user.username, code = %entry.code, "Company name updated");
    Ok(Json(entry))
}

/// DELETE /api/company-names/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = CompanyNameRepository::new(state.get_db())
        .delete(&id)
        .await?;
    if deleted {
        tracing::info!(operator = %current_user.username, id = %id, "Company name deleted");
    }
    Ok(Json(deleted))
}

/// POST /api/company-names/import - 批量导入 (按报名码覆盖)
pub async fn import(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CompanyNameImport>,
) -> AppResult<Json<ImportSummary>> {
    let rows = payload.rows.len();
    let summary = CompanyNameRepository::new(state.get_db())
        .import(payload.rows, payload.replace)
        .await?;

    tracing::info!(
        operator = %current_user.username,
        rows,
        replace = payload.replace,
        "Company name import finished"
    );
    Ok(Json(summary))
}
