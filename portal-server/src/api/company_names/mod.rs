//! Company Name Directory API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/company-names", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/unregistered", get(handler::unregistered))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission("company_names:read")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/import", post(handler::import))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            "company_names:manage",
        )));

    read_routes.merge(manage_routes)
}
