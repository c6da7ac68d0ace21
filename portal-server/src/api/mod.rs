//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录 / 当前用户
//! - [`users`] - 后台账号管理 (仅管理员)
//! - [`events`] - 数据变更推送 (SSE)
//! - [`settings`] - 站点设置与报名窗口状态
//! - [`groups`] - 分组 (办理时段) 管理
//! - [`pre_register`] - 公开报名
//! - [`companies`] - 报名公司管理与公开排队
//! - [`company_names`] - 报名码目录
//! - [`translations`] - 多语言资源

pub mod auth;
pub mod events;
pub mod health;
pub mod users;

// Portal APIs
pub mod companies;
pub mod company_names;
pub mod groups;
pub mod pre_register;
pub mod settings;
pub mod translations;

// Re-export common types for handlers
pub use crate::utils::AppResult;
