//! Public registration flow: gate, capacity, duplicates, codes

mod common;

use std::sync::Arc;

use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::json;

use portal_server::services::registration;
use shared::error::ErrorCode;
use shared::models::{CompanyCreate, CompanyUpdate, RegistrationRequest};

#[tokio::test]
async fn registration_returns_receipt_with_live_group_view() {
    let app = TestApp::open().await;
    let group_id = app.create_group("Morning", 1, 2).await;

    let (status, body) = app.register("Acme Trading", &group_id).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["company"]["name"], "Acme Trading");
    assert_eq!(body["company"]["paid"], false);
    assert_eq!(body["group"]["registered_count"], 1);
    assert_eq!(body["group"]["remaining"], 1);
    assert_eq!(body["group"]["is_full"], false);

    let id = body["company"]["id"].as_str().unwrap().to_string();
    let (status, receipt) = app.get(&format!("/api/pre-register/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["company"]["name"], "Acme Trading");
}

#[tokio::test]
async fn third_registration_into_group_of_two_is_rejected() {
    let app = TestApp::open().await;
    let group_id = app.create_group("Small", 1, 2).await;

    assert_eq!(app.register("First Co", &group_id).await.0, StatusCode::OK);
    assert_eq!(app.register("Second Co", &group_id).await.0, StatusCode::OK);

    let (status, body) = app.register("Third Co", &group_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::GroupFull.code() as u64);

    let (_, group) = app
        .get(&format!("/api/groups/{group_id}"), Some(&app.admin_token()))
        .await;
    assert_eq!(group["registered_count"], 2);
    assert_eq!(group["is_full"], true);
}

#[tokio::test]
async fn unlimited_group_accepts_everyone() {
    let app = TestApp::open().await;
    let group_id = app.create_group("Open", 1, 0).await;

    for i in 0..5 {
        let (status, _) = app.register(&format!("Company {i}"), &group_id).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn closed_window_rejects_registration() {
    let app = TestApp::new().await;
    let group_id = app.create_group("Morning", 1, 5).await;

    let (status, body) = app.register("Acme", &group_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::RegistrationClosed.code() as u64);
}

#[tokio::test]
async fn missing_fields_are_reported_by_name() {
    let app = TestApp::open().await;
    let group_id = app.create_group("Morning", 1, 5).await;

    let (status, body) = app
        .post(
            "/api/pre-register",
            None,
            json!({ "name": "Acme", "phone_number": "  ", "group_id": group_id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::RequiredField.code() as u64);
    assert_eq!(body["details"]["field"], "phone_number");

    let (status, body) = app.post("/api/pre-register", None, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "name");
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let app = TestApp::open().await;
    let (status, body) = app.register("Acme", "company_group:missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), ErrorCode::GroupNotFound.code() as u64);
}

#[tokio::test]
async fn duplicate_name_in_same_group_conflicts() {
    let app = TestApp::open().await;
    let group_a = app.create_group("A", 1, 10).await;
    let group_b = app.create_group("B", 1, 10).await;

    assert_eq!(app.register("Acme Trading", &group_a).await.0, StatusCode::OK);

    let (status, body) = app.register("  acme   TRADING ", &group_a).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::DuplicateRegistration.code() as u64);

    // 其他分组不受影响
    assert_eq!(app.register("Acme Trading", &group_b).await.0, StatusCode::OK);
}

#[tokio::test]
async fn registration_code_fills_company_name() {
    let app = TestApp::open().await;
    let token = app.admin_token();
    let group_id = app.create_group("Morning", 1, 5).await;

    let (status, _) = app
        .post(
            "/api/company-names",
            Some(&token),
            json!({ "name": "Directory Name LLC", "code": "ab-12" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, entry) = app.get("/api/pre-register/by-code/AB-12", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["name"], "Directory Name LLC");

    let (status, body) = app
        .post(
            "/api/pre-register",
            None,
            json!({
                "name": "typed by hand",
                "phone_number": "0500000000",
                "group_id": group_id,
                "code": " ab-12 ",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["company"]["name"], "Directory Name LLC");
    assert_eq!(body["company"]["code"], "AB-12");

    let (status, body) = app.get("/api/pre-register/by-code/NOPE", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::InvalidRegistrationCode.code() as u64);
}

#[tokio::test]
async fn disabled_codes_are_rejected() {
    let app = TestApp::open().await;
    let token = app.admin_token();
    let group_id = app.create_group("Morning", 1, 5).await;

    app.put(
        "/api/settings/website",
        Some(&token),
        json!({ "codes_active": "0" }),
    )
    .await;

    let (status, body) = app.get("/api/pre-register/by-code/AB-12", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::RegistrationCodesDisabled.code() as u64);

    let (status, body) = app
        .post(
            "/api/pre-register",
            None,
            json!({ "name": "Acme", "phone_number": "1", "group_id": group_id, "code": "AB-12" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::RegistrationCodesDisabled.code() as u64);
}

#[tokio::test]
async fn concurrent_registrations_never_exceed_capacity() {
    let app = Arc::new(TestApp::open().await);
    let group_id = app.create_group("Rush", 1, 3).await;

    let mut handles = Vec::new();
    for i in 0..12 {
        let state = app.state.clone();
        let group_id = group_id.clone();
        handles.push(tokio::spawn(async move {
            registration::register(
                &state,
                RegistrationRequest {
                    name: format!("Rush Co {i}"),
                    phone_number: "0500000000".into(),
                    group_id,
                    code: None,
                },
            )
            .await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::GroupFull),
        }
    }
    assert_eq!(accepted, 3);

    let (_, group) = app
        .get(&format!("/api/groups/{group_id}"), Some(&app.admin_token()))
        .await;
    assert_eq!(group["registered_count"], 3);
}

#[tokio::test]
async fn admin_create_skips_window_but_keeps_capacity() {
    let app = TestApp::new().await;
    let group_id = app.create_group("Solo", 1, 1).await;

    let created = registration::admin_create(
        &app.state,
        CompanyCreate {
            name: "Walk-in".into(),
            phone_number: "0500000000".into(),
            group_id: group_id.clone(),
            code: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.group_id.as_deref(), Some(group_id.as_str()));

    let err = registration::admin_create(
        &app.state,
        CompanyCreate {
            name: "Second walk-in".into(),
            phone_number: "0500000000".into(),
            group_id,
            code: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::GroupFull);
}

#[tokio::test]
async fn moving_company_rechecks_target_capacity() {
    let app = TestApp::open().await;
    let full = app.create_group("Full", 1, 1).await;
    let roomy = app.create_group("Roomy", 1, 5).await;

    assert_eq!(app.register("Occupant", &full).await.0, StatusCode::OK);
    let (_, body) = app.register("Mover", &roomy).await;
    let mover_id = body["company"]["id"].as_str().unwrap().to_string();

    let err = registration::admin_update(
        &app.state,
        &mover_id,
        CompanyUpdate {
            group_id: Some(full.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::GroupFull);

    // 在原分组内改名不占用新名额
    let renamed = registration::admin_update(
        &app.state,
        &mover_id,
        CompanyUpdate {
            name: Some("Mover Renamed".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Mover Renamed");
    assert_eq!(renamed.group_id.as_deref(), Some(roomy.as_str()));
}

#[tokio::test]
async fn registration_publishes_change_events() {
    let app = TestApp::open().await;
    let group_id = app.create_group("Morning", 1, 5).await;
    let mut rx = app.state.events.subscribe();

    assert_eq!(app.register("Acme", &group_id).await.0, StatusCode::OK);

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.kind, shared::event::EventKind::CompaniesChanged);
    assert_eq!(second.kind, shared::event::EventKind::GroupsChanged);
}
