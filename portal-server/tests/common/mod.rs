//! Shared helpers for in-process API tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::Duration;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use portal_server::auth::permissions::get_default_permissions;
use portal_server::db::DbService;
use portal_server::db::repository::WebsiteSettingsRepository;
use portal_server::services::https::build_router;
use portal_server::utils::time::format_date;
use portal_server::{Config, ServerState};
use shared::models::WebsiteSettingsUpdate;

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
}

impl TestApp {
    /// In-memory database, bootstrap admin, fresh router
    pub async fn new() -> Self {
        let config = Config::with_overrides("/tmp/portal-test-unused", 0);
        let db = DbService::memory().await.expect("memory db");
        let state = ServerState::with_db(config, db.db);
        state.bootstrap_admin().await.expect("bootstrap admin");
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Same as [`TestApp::new`] with the registration window manually open
    pub async fn open() -> Self {
        let app = Self::new().await;
        app.set_open(true).await;
        app
    }

    pub async fn set_open(&self, is_open: bool) {
        WebsiteSettingsRepository::new(self.state.get_db())
            .update(WebsiteSettingsUpdate {
                is_open: Some(is_open),
                auto_schedule: Some(false),
                ..Default::default()
            })
            .await
            .expect("update settings");
    }

    pub fn token(&self, role: &str) -> String {
        self.state
            .get_jwt_service()
            .generate_token(
                &format!("user:{role}"),
                role,
                role,
                &get_default_permissions(role),
            )
            .expect("token")
    }

    pub fn admin_token(&self) -> String {
        self.token("admin")
    }

    /// "YYYY-MM-DD" relative to today in the business timezone
    pub fn date_in(&self, days: i64) -> String {
        format_date(self.state.business_today() + Duration::days(days))
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Create a group through the API, returns its id
    pub async fn create_group(&self, name: &str, days_from_today: i64, max: u32) -> String {
        let token = self.admin_token();
        let (status, body) = self
            .post(
                "/api/groups",
                Some(&token),
                serde_json::json!({
                    "name": name,
                    "date": self.date_in(days_from_today),
                    "time_from": "09:00",
                    "time_to": "11:00",
                    "max_companies": max,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create group failed: {body}");
        body["id"].as_str().expect("group id").to_string()
    }

    /// Public registration, returns status and body
    pub async fn register(&self, name: &str, group_id: &str) -> (StatusCode, Value) {
        self.post(
            "/api/pre-register",
            None,
            serde_json::json!({
                "name": name,
                "phone_number": "0500000000",
                "group_id": group_id,
            }),
        )
        .await
    }
}

/// Numeric error code of an error envelope
pub fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or(0)
}
