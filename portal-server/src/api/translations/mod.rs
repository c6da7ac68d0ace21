//! Translation API 模块
//!
//! 读取公开；修改与初始化需要 translations:manage

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/translations", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{lang}", get(handler::get_by_lang));

    let manage_routes = Router::new()
        .route("/seed", post(handler::seed))
        .route("/{lang}", put(handler::update))
        .layer(middleware::from_fn(require_permission("translations:manage")));

    public_routes.merge(manage_routes)
}
