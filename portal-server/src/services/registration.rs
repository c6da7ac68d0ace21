//! Registration Service
//!
//! 报名流程：窗口检查 → 必填校验 → 报名码 → 分组存在 → (分组锁内) 重名 + 名额 → 写入。
//! 管理端新增/调组共用同一个分组锁内的检查逻辑。

use shared::capacity::Capacity;
use shared::event::EventKind;
use shared::gate;
use shared::models::{
    Company, CompanyCreate, CompanyName, CompanyStatusUpdate, CompanyUpdate, Group, GroupView,
    RegistrationReceipt, RegistrationRequest, normalize_code, normalize_name,
};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::repository::{
    CompanyNameRepository, CompanyRepository, GroupRepository, WebsiteSettingsRepository,
    company::TABLE as COMPANY_TABLE, group::TABLE as GROUP_TABLE, record_key,
};
use crate::utils::time::{format_date, parse_date};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 公开报名 (`POST /api/pre-register`)
pub async fn register(
    state: &ServerState,
    req: RegistrationRequest,
) -> AppResult<RegistrationReceipt> {
    let settings = WebsiteSettingsRepository::new(state.get_db())
        .get_or_create()
        .await?;

    let status = gate::evaluate(&settings, state.business_now());
    if !status.is_open {
        tracing::info!(group_id = %req.group_id, "Registration rejected: window closed");
        return Err(AppError::registration_closed());
    }

    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.group_id, "group_id", MAX_SHORT_TEXT_LEN)?;

    let mut name = req.name.trim().to_string();
    let mut code = None;
    if let Some(raw) = req.code.as_deref().filter(|c| !c.trim().is_empty()) {
        let entry = lookup_code(state, settings.codes_active, raw).await?;
        name = entry.name;
        code = Some(entry.code);
    }

    let group = load_group(state, &req.group_id).await?;
    let company = Company {
        id: None,
        name,
        group_id: group.id.clone(),
        phone_number: req.phone_number.trim().to_string(),
        paid: false,
        spent: false,
        payment_date: None,
        code,
        created_at: now_millis(),
    };

    let company = place_in_group(state, &group, company, None).await?;
    tracing::info!(
        company = %company.name,
        group = %group.name,
        "Company pre-registered"
    );

    state.notify(EventKind::CompaniesChanged);
    state.notify(EventKind::GroupsChanged);

    receipt_for(state, company, settings.post_registration_message).await
}

/// 查询已有报名的回执 (`GET /api/pre-register/{id}`)
pub async fn receipt(state: &ServerState, id: &str) -> AppResult<RegistrationReceipt> {
    let company = CompanyRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RegistrationNotFound).with_detail("id", id))?;
    let settings = WebsiteSettingsRepository::new(state.get_db())
        .get_or_create()
        .await?;
    receipt_for(state, company, settings.post_registration_message).await
}

/// 报名码查询 (自动填充公司名称)
pub async fn lookup_code(
    state: &ServerState,
    codes_active: bool,
    code: &str,
) -> AppResult<CompanyName> {
    if !codes_active {
        return Err(AppError::new(ErrorCode::RegistrationCodesDisabled));
    }
    CompanyNameRepository::new(state.get_db())
        .find_by_code(code)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::InvalidRegistrationCode)
                .with_detail("code", normalize_code(code))
        })
}

/// 管理端新增公司：不检查报名窗口，保留重名与名额检查
pub async fn admin_create(state: &ServerState, data: CompanyCreate) -> AppResult<Company> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.group_id, "group_id", MAX_SHORT_TEXT_LEN)?;

    let group = load_group(state, &data.group_id).await?;
    let company = Company {
        id: None,
        name: data.name.trim().to_string(),
        group_id: group.id.clone(),
        phone_number: data.phone_number.trim().to_string(),
        paid: false,
        spent: false,
        payment_date: None,
        code: data
            .code
            .as_deref()
            .map(normalize_code)
            .filter(|c| !c.is_empty()),
        created_at: now_millis(),
    };

    let company = place_in_group(state, &group, company, None).await?;
    state.notify(EventKind::CompaniesChanged);
    state.notify(EventKind::GroupsChanged);
    Ok(company)
}

/// 管理端修改公司：改名在原分组内查重，调组时对目标分组重新检查名额
pub async fn admin_update(
    state: &ServerState,
    id: &str,
    data: CompanyUpdate,
) -> AppResult<Company> {
    let repo = CompanyRepository::new(state.get_db());
    let mut company = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound).with_detail("id", id))?;
    let company_id = company
        .id
        .clone()
        .unwrap_or_else(|| record_key(COMPANY_TABLE, id));

    if let Some(name) = data.name {
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        company.name = name.trim().to_string();
    }
    if let Some(phone) = data.phone_number {
        validate_required_text(&phone, "phone_number", MAX_SHORT_TEXT_LEN)?;
        company.phone_number = phone.trim().to_string();
    }

    let target_group = match data.group_id.as_deref().map(str::trim) {
        Some("") => return Err(AppError::required_field("group_id")),
        Some(group_id) => Some(load_group(state, group_id).await?),
        None => match company.group_id.as_deref() {
            Some(current) => GroupRepository::new(state.get_db()).find_by_id(current).await?,
            None => None,
        },
    };

    let updated = match target_group {
        Some(group) => {
            let moved = company.group_id != group.id;
            if moved {
                tracing::info!(
                    company = %company.name,
                    from = ?company.group_id,
                    to = ?group.id,
                    "Moving company to another group"
                );
            }
            company.group_id = group.id.clone();
            let updated = place_in_group(state, &group, company, Some(&company_id)).await?;
            if moved {
                state.notify(EventKind::GroupsChanged);
            }
            updated
        }
        // 分组已删除且未调组：仅更新字段
        None => repo.replace(&company_id, company).await?,
    };

    state.notify(EventKind::CompaniesChanged);
    Ok(updated)
}

/// 付款/消费状态切换
///
/// - `paid=true` 且未给日期：已有日期保留，否则记为今天
/// - `paid=false`：清空付款日期
pub async fn update_status(
    state: &ServerState,
    id: &str,
    data: CompanyStatusUpdate,
) -> AppResult<Company> {
    let repo = CompanyRepository::new(state.get_db());
    let mut company = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound).with_detail("id", id))?;

    let explicit_date = match data.payment_date.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(raw) => Some(format_date(parse_date(raw)?)),
    };

    if let Some(paid) = data.paid {
        company.paid = paid;
        if !paid {
            company.payment_date = None;
        } else if company.payment_date.is_none() && explicit_date.is_none() {
            company.payment_date = Some(format_date(state.business_today()));
        }
    }
    if company.paid && explicit_date.is_some() {
        company.payment_date = explicit_date;
    }
    if let Some(spent) = data.spent {
        company.spent = spent;
    }

    let updated = repo.replace(id, company).await?;
    tracing::info!(
        company = %updated.name,
        paid = updated.paid,
        spent = updated.spent,
        "Company status updated"
    );
    state.notify(EventKind::CompaniesChanged);
    Ok(updated)
}

/// Load a group by id, `GroupNotFound` when it does not exist
pub async fn load_group(state: &ServerState, group_id: &str) -> AppResult<Group> {
    GroupRepository::new(state.get_db())
        .find_by_id(group_id.trim())
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::GroupNotFound)
                .with_detail("group_id", record_key(GROUP_TABLE, group_id.trim()))
        })
}

/// Live view of one group
pub async fn group_view(state: &ServerState, group: Group) -> AppResult<GroupView> {
    let Some(group_id) = group.id.clone() else {
        return Ok(GroupView::new(group, 0));
    };
    let count = CompanyRepository::new(state.get_db())
        .count_by_group(&group_id)
        .await?;
    Ok(GroupView::new(group, count))
}

/// Live views of several groups (single aggregate query)
pub async fn group_views(state: &ServerState, groups: Vec<Group>) -> AppResult<Vec<GroupView>> {
    let counts = CompanyRepository::new(state.get_db())
        .counts_by_group()
        .await?;
    Ok(groups
        .into_iter()
        .map(|g| {
            let count = g
                .id
                .as_deref()
                .and_then(|id| counts.get(id).copied())
                .unwrap_or(0);
            GroupView::new(g, count)
        })
        .collect())
}

/// 分组锁内完成重名检查、名额检查与写入
///
/// `existing` 为已存在公司的 id (修改场景)：查重时排除自身，
/// 已在该分组内的公司不再占用新名额。
async fn place_in_group(
    state: &ServerState,
    group: &Group,
    company: Company,
    existing: Option<&str>,
) -> AppResult<Company> {
    let group_id = group
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Group record without id"))?;

    let lock = state.group_locks.lock_for(&group_id);
    let _guard = lock.lock().await;

    let repo = CompanyRepository::new(state.get_db());
    let members = repo.find_by_group(&group_id).await?;

    let wanted = normalize_name(&company.name);
    let is_self = |c: &Company| existing.is_some() && c.id.as_deref() == existing;

    if members
        .iter()
        .any(|c| !is_self(c) && normalize_name(&c.name) == wanted)
    {
        return Err(AppError::duplicate_registration(&company.name));
    }

    let already_member = members.iter().any(is_self);
    if !already_member {
        Capacity::new(group.max_companies, members.len() as u64).ensure_slot(&group_id)?;
    }

    let saved = match existing {
        Some(id) => repo.replace(id, company).await?,
        None => repo.create(company).await?,
    };
    Ok(saved)
}

async fn receipt_for(
    state: &ServerState,
    company: Company,
    message: String,
) -> AppResult<RegistrationReceipt> {
    let group = match company.group_id.as_deref() {
        Some(group_id) => GroupRepository::new(state.get_db()).find_by_id(group_id).await?,
        None => None,
    };
    let group = match group {
        Some(g) => Some(group_view(state, g).await?),
        None => None,
    };
    Ok(RegistrationReceipt {
        company,
        group,
        message,
    })
}
