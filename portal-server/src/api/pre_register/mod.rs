//! Public registration API (无需认证)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/pre-register | POST | 提交报名 |
//! | /api/pre-register/{id} | GET | 报名回执 |
//! | /api/pre-register/by-code/{code} | GET | 报名码查询公司名称 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pre-register", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::register))
        .route("/{id}", get(handler::receipt))
        .route("/by-code/{code}", get(handler::lookup_code))
}
