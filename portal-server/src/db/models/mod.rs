//! Server-only database models
//!
//! 其余模型在 `shared::models` 中定义 (客户端同样使用)

pub mod user;

pub use user::User;
