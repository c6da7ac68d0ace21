//! Company Model
//!
//! 报名公司：通过预登记创建，由管理员维护付款/消费状态

use serde::{Deserialize, Serialize};

use crate::models::GroupView;
use crate::serde_helpers;

/// Group label shown for companies whose group was deleted
pub const NO_GROUP: &str = "no-group";

/// Company entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(
        default,
        deserialize_with = "serde_helpers::record_key::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    /// 所属分组 ("company_group:xxx")，分组删除后可能悬空
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub spent: bool,
    /// 付款日期 "YYYY-MM-DD"
    #[serde(default)]
    pub payment_date: Option<String>,
    /// 报名时使用的报名码
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Public registration payload (`POST /api/pre-register`)
///
/// 所有字段都有默认值，缺失字段由服务端统一报 RequiredField。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Registration result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub company: Company,
    /// 所属分组 (分组已删除时为 None)
    pub group: Option<GroupView>,
    /// 站点设置中的报名后提示语
    pub message: String,
}

/// Admin create company payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Admin update company payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Payment / spending status toggles (`PATCH /api/companies/{id}/status`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyStatusUpdate {
    #[serde(
        default,
        deserialize_with = "serde_helpers::truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub spent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
}

/// Admin list filters (`GET /api/companies`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<bool>,
    /// 名称 / 电话模糊搜索
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CompanyFilter {
    pub fn matches(&self, company: &Company) -> bool {
        if let Some(ref g) = self.group_id
            && company.group_id.as_deref() != Some(g.as_str())
        {
            return false;
        }
        if let Some(paid) = self.paid
            && company.paid != paid
        {
            return false;
        }
        if let Some(spent) = self.spent
            && company.spent != spent
        {
            return false;
        }
        if let Some(ref term) = self.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty()
                && !company.name.to_lowercase().contains(&term)
                && !company.phone_number.contains(&term)
            {
                return false;
            }
        }
        true
    }
}

/// Bulk delete payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Bulk delete result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

/// Public queue row (`GET /api/companies/public-queue`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// 排队序号 (从 1 开始)
    pub position: usize,
    pub name: String,
    pub group_name: String,
    pub paid: bool,
    pub spent: bool,
}

/// Normalised company name used for duplicate detection
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
