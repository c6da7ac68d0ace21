//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 无需登录的 API
///
/// 门户前台使用的只读接口、报名提交与事件流
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if path == "/api/auth/login" {
        return true;
    }

    if path == "/api/pre-register" || path.starts_with("/api/pre-register/") {
        return (*method == Method::POST && path == "/api/pre-register") || *method == Method::GET;
    }

    if *method != Method::GET {
        return false;
    }

    matches!(
        path,
        "/api/settings/website"
            | "/api/settings/website/status"
            | "/api/groups/public"
            | "/api/groups/public/all"
            | "/api/companies/public-queue"
            | "/api/events"
            | "/api/translations"
    ) || path.starts_with("/api/translations/")
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health`)
/// - [`is_public_route`] 列出的公共接口
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 权限检查中间件 - 要求特定权限
///
/// ```ignore
/// Router::new()
///     .route("/", get(handler::list))
///     .layer(middleware::from_fn(require_permission("companies:read")));
/// ```
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    username = user.username.clone(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// 管理员中间件 - 要求管理员角色
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            username = user.username.clone(),
            user_role = user.role.clone()
        );
        return Err(AppError::new(shared::error::ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
        assert!(is_public_route(&Method::POST, "/api/pre-register"));
        assert!(is_public_route(&Method::GET, "/api/pre-register/company:abc"));
        assert!(is_public_route(&Method::GET, "/api/pre-register/by-code/A1"));
        assert!(is_public_route(&Method::GET, "/api/settings/website/status"));
        assert!(is_public_route(&Method::GET, "/api/groups/public"));
        assert!(is_public_route(&Method::GET, "/api/translations/en"));
        assert!(is_public_route(&Method::GET, "/api/events"));
    }

    #[test]
    fn admin_routes_are_protected() {
        assert!(!is_public_route(&Method::PUT, "/api/settings/website"));
        assert!(!is_public_route(&Method::GET, "/api/groups"));
        assert!(!is_public_route(&Method::GET, "/api/companies"));
        assert!(!is_public_route(&Method::PUT, "/api/translations/en"));
        assert!(!is_public_route(&Method::POST, "/api/translations/seed"));
        assert!(!is_public_route(&Method::POST, "/api/pre-register/by-code/A1"));
        assert!(!is_public_route(&Method::GET, "/api/users"));
    }
}
