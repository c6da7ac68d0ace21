//! Permission Definitions
//!
//! 两个固定角色：
//! - admin: 全部权限 (`all`)，包括用户管理
//! - staff: 查看报名/分组/名录，修改付款状态

/// 可授予的权限列表
pub const ALL_PERMISSIONS: &[&str] = &[
    "settings:manage",      // 站点开关、排期、提示语
    "groups:read",          // 查看分组
    "groups:manage",        // 分组增删改
    "companies:read",       // 查看报名公司
    "companies:status",     // 付款 / 消费状态
    "companies:manage",     // 公司增删改、批量删除
    "company_names:read",   // 查看公司名录
    "company_names:manage", // 名录增删改、导入
    "translations:manage",  // 翻译资源维护
];

/// Admin 专属权限
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &[
    "users:manage", // 用户管理
    "all",          // 超级权限
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_STAFF_PERMISSIONS: &[&str] = &[
    "companies:read",
    "companies:status",
    "groups:read",
    "company_names:read",
];

pub const ROLES: &[&str] = &["admin", "staff"];

/// Get permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    let perms = match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS,
        "staff" => DEFAULT_STAFF_PERMISSIONS,
        _ => &[],
    };
    perms.iter().map(|s| s.to_string()).collect()
}

pub fn is_valid_role(role_name: &str) -> bool {
    ROLES.contains(&role_name)
}

/// Validate if a permission string is valid
pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
        || ADMIN_ONLY_PERMISSIONS.contains(&permission)
        || permission.ends_with(":*")
}
