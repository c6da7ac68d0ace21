//! Group API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/groups/public | GET | 今天及以后、未满的分组 | 无 |
//! | /api/groups/public/all | GET | 今天及以后的全部分组 | 无 |
//! | /api/groups | GET | 全部分组 (含名额) | groups:read |
//! | /api/groups/{id} | GET | 单个分组 | groups:read |
//! | /api/groups | POST | 创建 | groups:manage |
//! | /api/groups/{id} | PUT / DELETE | 修改 / 删除 | groups:manage |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/groups", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/public", get(handler::list_public))
        .route("/public/all", get(handler::list_public_all));

    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission("groups:read")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission("groups:manage")));

    public_routes.merge(read_routes).merge(manage_routes)
}
