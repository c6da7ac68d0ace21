//! Company API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/companies/public-queue | GET | 公开排队列表 | 无 |
//! | /api/companies | GET | 列表 (group_id / paid / spent / search 过滤) | companies:read |
//! | /api/companies/{id} | GET | 详情 | companies:read |
//! | /api/companies/{id}/status | PATCH | 付款 / 消费状态 | companies:status |
//! | /api/companies | POST | 新增 (不受报名窗口限制) | companies:manage |
//! | /api/companies/{id} | PUT / DELETE | 修改 (可调组) / 删除 | companies:manage |
//! | /api/companies/bulk-delete | POST | 批量删除 | companies:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/companies", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/public-queue", get(handler::public_queue));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission("companies:read")));

    let status_routes = Router::new()
        .route("/{id}/status", patch(handler::update_status))
        .layer(middleware::from_fn(require_permission("companies:status")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/bulk-delete", post(handler::bulk_delete))
        .layer(middleware::from_fn(require_permission("companies:manage")));

    public_routes
        .merge(read_routes)
        .merge(status_routes)
        .merge(manage_routes)
}
