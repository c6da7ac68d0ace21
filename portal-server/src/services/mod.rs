//! 服务层 - 服务器核心服务
//!
//! # 服务列表
//!
//! - [`EventHub`] - 数据变更广播 (SSE 推送)
//! - [`HttpsService`] - HTTP 服务器
//! - [`registration`] - 报名 / 名额 / 调组逻辑

pub mod events;
pub mod https;
pub mod registration;

pub use events::EventHub;
pub use https::HttpsService;
