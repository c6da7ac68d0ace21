//! Website Settings API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/settings/website | GET | 站点设置 | 无 |
//! | /api/settings/website | PUT | 部分更新 | settings:manage |
//! | /api/settings/website/status | GET | 报名窗口状态与倒计时 | 无 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/website", get(handler::get))
        .route("/website/status", get(handler::status));

    let manage_routes = Router::new()
        .route("/website", put(handler::update))
        .layer(middleware::from_fn(require_permission("settings:manage")));

    public_routes.merge(manage_routes)
}
