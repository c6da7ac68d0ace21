//! Back-office API: auth, settings, groups, companies, directory, translations, users

mod common;

use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::json;

use shared::error::ErrorCode;

// ========== Auth ==========

#[tokio::test]
async fn protected_routes_require_token() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/companies", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), ErrorCode::NotAuthenticated.code() as u64);

    let (status, body) = app.get("/api/companies", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), ErrorCode::TokenInvalid.code() as u64);

    // 公开接口无需令牌
    assert_eq!(app.get("/health", None).await.0, StatusCode::OK);
    assert_eq!(app.get("/api/companies/public-queue", None).await.0, StatusCode::OK);
    assert_eq!(app.get("/api/settings/website/status", None).await.0, StatusCode::OK);
}

#[tokio::test]
async fn login_with_bootstrap_admin() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "admin", "password": "wrong" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), ErrorCode::InvalidCredentials.code() as u64);

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "admin", "password": "admin" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["role"], "admin");

    let token = body["token"].as_str().unwrap().to_string();
    let (status, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["permissions"], json!(["all"]));
}

#[tokio::test]
async fn staff_can_read_and_toggle_status_but_not_manage() {
    let app = TestApp::open().await;
    let staff = app.token("staff");
    let group_id = app.create_group("Morning", 1, 5).await;
    let (_, body) = app.register("Acme", &group_id).await;
    let company_id = body["company"]["id"].as_str().unwrap().to_string();

    assert_eq!(app.get("/api/companies", Some(&staff)).await.0, StatusCode::OK);
    assert_eq!(app.get("/api/groups", Some(&staff)).await.0, StatusCode::OK);

    let (status, _) = app
        .patch(
            &format!("/api/companies/{company_id}/status"),
            Some(&staff),
            json!({ "spent": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/groups",
            Some(&staff),
            json!({ "name": "X", "date": app.date_in(1), "time_from": "09:00", "time_to": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), ErrorCode::PermissionDenied.code() as u64);

    let (status, body) = app.get("/api/users", Some(&staff)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), ErrorCode::AdminRequired.code() as u64);
}

// ========== Settings ==========

#[tokio::test]
async fn settings_are_created_with_defaults_and_merged_on_update() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    let (status, settings) = app.get("/api/settings/website", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["is_open"], false);
    assert_eq!(settings["codes_active"], true);

    let (status, settings) = app
        .put(
            "/api/settings/website",
            Some(&token),
            json!({ "is_open": "on", "message": null, "post_registration_message": "See you" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["is_open"], true);
    assert_eq!(settings["message"], "");
    assert_eq!(settings["post_registration_message"], "See you");
    assert_eq!(settings["codes_active"], true);

    let (_, status) = app.get("/api/settings/website/status", None).await;
    assert_eq!(status["is_open"], true);
    assert_eq!(status["schedule_active"], false);
    assert!(status["remaining_seconds"].is_null());
}

#[tokio::test]
async fn malformed_schedule_falls_back_to_manual_flag() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    app.put(
        "/api/settings/website",
        Some(&token),
        json!({ "is_open": 1, "auto_schedule": "yes", "open_time": "9am", "close_time": "17:00" }),
    )
    .await;

    let (_, status) = app.get("/api/settings/website/status", None).await;
    assert_eq!(status["schedule_active"], false);
    assert_eq!(status["is_open"], true);
}

#[tokio::test]
async fn active_schedule_reports_countdown() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    app.put(
        "/api/settings/website",
        Some(&token),
        json!({ "auto_schedule": true, "open_time": "00:00", "close_time": "23:59:59" }),
    )
    .await;

    let (_, status) = app.get("/api/settings/website/status", None).await;
    assert_eq!(status["schedule_active"], true);
    let remaining = status["remaining_seconds"].as_i64().unwrap();
    assert!(remaining > 0 && remaining <= 24 * 3600);
}

#[tokio::test]
async fn settings_update_requires_permission() {
    let app = TestApp::new().await;
    let staff = app.token("staff");
    let (status, _) = app
        .put("/api/settings/website", Some(&staff), json!({ "is_open": true }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ========== Groups ==========

#[tokio::test]
async fn group_writes_derive_weekday_and_validate_times() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    let (status, group) = app
        .post(
            "/api/groups",
            Some(&token),
            json!({ "name": " Friday slot ", "date": "2026-10-16", "time_from": "9:00", "time_to": "10:30" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{group}");
    assert_eq!(group["name"], "Friday slot");
    assert_eq!(group["day"], "Friday");
    assert_eq!(group["time_from"], "09:00");
    assert_eq!(group["max_companies"], 0);
    assert!(group["remaining"].is_null());

    let (status, body) = app
        .post(
            "/api/groups",
            Some(&token),
            json!({ "name": "Backwards", "date": "2026-10-16", "time_from": "11:00", "time_to": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), ErrorCode::GroupInvalidTimeRange.code() as u64);

    let id = group["id"].as_str().unwrap();
    let (status, updated) = app
        .put(
            &format!("/api/groups/{id}"),
            Some(&token),
            json!({ "date": "2026-10-17" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["day"], "Saturday");
}

#[tokio::test]
async fn public_group_lists_filter_past_and_full_groups() {
    let app = TestApp::open().await;
    let _past = app.create_group("Yesterday", -1, 5).await;
    let today = app.create_group("Today", 0, 1).await;
    let _later = app.create_group("Next week", 7, 5).await;

    assert_eq!(app.register("Only One", &today).await.0, StatusCode::OK);

    let (_, open) = app.get("/api/groups/public", None).await;
    let names: Vec<&str> = open
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Next week"]);

    let (_, all) = app.get("/api/groups/public/all", None).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Today", "Next week"]);
    assert_eq!(all[0]["is_full"], true);
}

#[tokio::test]
async fn lowering_capacity_below_count_marks_group_full() {
    let app = TestApp::open().await;
    let token = app.admin_token();
    let group_id = app.create_group("Shrinking", 1, 5).await;
    app.register("One", &group_id).await;
    app.register("Two", &group_id).await;

    let (status, group) = app
        .put(
            &format!("/api/groups/{group_id}"),
            Some(&token),
            json!({ "max_companies": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(group["is_full"], true);
    assert_eq!(group["remaining"], 0);
}

// ========== Companies ==========

#[tokio::test]
async fn paid_toggle_stamps_and_clears_payment_date() {
    let app = TestApp::open().await;
    let token = app.admin_token();
    let group_id = app.create_group("Morning", 1, 5).await;
    let (_, body) = app.register("Acme", &group_id).await;
    let id = body["company"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/companies/{id}/status");

    let (status, company) = app.patch(&uri, Some(&token), json!({ "paid": "true" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(company["paid"], true);
    assert_eq!(company["payment_date"], app.date_in(0));

    let (_, company) = app
        .patch(&uri, Some(&token), json!({ "payment_date": "2026-01-31" }))
        .await;
    assert_eq!(company["payment_date"], "2026-01-31");

    let (_, company) = app.patch(&uri, Some(&token), json!({ "paid": 0 })).await;
    assert_eq!(company["paid"], false);
    assert!(company["payment_date"].is_null());

    let (status, _) = app
        .patch(&uri, Some(&token), json!({ "paid": true, "payment_date": "31/01/2026" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_queue_is_ordered_and_marks_orphans() {
    let app = TestApp::open().await;
    let token = app.admin_token();
    let kept = app.create_group("Kept", 1, 5).await;
    let doomed = app.create_group("Doomed", 1, 5).await;

    // created_at 为毫秒时间戳，间隔几毫秒保证顺序确定
    for (name, group) in [("First", &kept), ("Second", &doomed), ("Third", &kept)] {
        assert_eq!(app.register(name, group).await.0, StatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, _) = app.delete(&format!("/api/groups/{doomed}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, queue) = app.get("/api/companies/public-queue", None).await;
    let queue = queue.as_array().unwrap();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue[0]["position"], 1);
    assert_eq!(queue[0]["name"], "First");
    assert_eq!(queue[1]["group_name"], "no-group");
    assert_eq!(queue[2]["group_name"], "Kept");
    assert!(queue[0].get("phone_number").is_none());
}

#[tokio::test]
async fn company_list_filters_and_bulk_delete() {
    let app = TestApp::open().await;
    let token = app.admin_token();
    let a = app.create_group("A", 1, 10).await;
    let b = app.create_group("B", 1, 10).await;

    let (_, one) = app.register("Alpha Foods", &a).await;
    let (_, two) = app.register("Beta Foods", &b).await;
    app.register("Gamma Tools", &a).await;

    let (_, list) = app
        .get(&format!("/api/companies?group_id={a}"), Some(&token))
        .await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let bare = a.strip_prefix("company_group:").unwrap();
    let (_, list) = app
        .get(&format!("/api/companies?group_id={bare}"), Some(&token))
        .await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (_, list) = app.get("/api/companies?search=foods", Some(&token)).await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let ids = json!({
        "ids": [one["company"]["id"], two["company"]["id"], "company:missing"]
    });
    let (status, result) = app
        .post("/api/companies/bulk-delete", Some(&token), ids)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["deleted"], 2);

    let (_, list) = app.get("/api/companies", Some(&token)).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

// ========== Company names ==========

#[tokio::test]
async fn company_name_import_upserts_by_code() {
    let app = TestApp::open().await;
    let token = app.admin_token();

    let (status, summary) = app
        .post(
            "/api/company-names/import",
            Some(&token),
            json!({
                "rows": [
                    { "name": "Alpha", "code": "a1" },
                    { "name": "Beta", "code": "B2", "contact_name": "Sam" },
                    { "name": "", "code": "C3" },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary, json!({ "inserted": 2, "updated": 0, "skipped": 1 }));

    let (_, summary) = app
        .post(
            "/api/company-names/import",
            Some(&token),
            json!({ "rows": [ { "name": "Alpha Renamed", "code": "A1" } ] }),
        )
        .await;
    assert_eq!(summary, json!({ "inserted": 0, "updated": 1, "skipped": 0 }));

    let (status, body) = app
        .post(
            "/api/company-names",
            Some(&token),
            json!({ "name": "Clash", "code": " b2 " }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::CompanyNameCodeExists.code() as u64);

    // 已报名的公司不出现在未报名列表中
    let group_id = app.create_group("Morning", 1, 5).await;
    app.register("alpha  renamed", &group_id).await;
    let (_, pending) = app.get("/api/company-names/unregistered", Some(&token)).await;
    let names: Vec<&str> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beta"]);

    let (_, summary) = app
        .post(
            "/api/company-names/import",
            Some(&token),
            json!({ "rows": [ { "name": "Fresh", "code": "F1" } ], "replace": true }),
        )
        .await;
    assert_eq!(summary["inserted"], 1);
    let (_, all) = app.get("/api/company-names", Some(&token)).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn company_name_delete_requires_manage_permission() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    let (_, entry) = app
        .post(
            "/api/company-names",
            Some(&token),
            json!({ "name": "Gamma", "code": "G7" }),
        )
        .await;
    let id = entry["id"].as_str().unwrap().to_string();
    let uri = format!("/api/company-names/{}", id);

    let (status, _) = app.delete(&uri, Some(&app.token("staff"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, deleted) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(true));

    let (_, deleted) = app.delete(&uri, Some(&token)).await;
    assert_eq!(deleted, json!(false));
}

// ========== Translations ==========

#[tokio::test]
async fn translations_seed_merge_and_read() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    let (status, body) = app.get("/api/translations/en", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), ErrorCode::TranslationNotFound.code() as u64);

    let (status, seeded) = app.post("/api/translations/seed", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seeded["seeded"], json!(["ar", "en"]));

    let (_, seeded) = app.post("/api/translations/seed", Some(&token), json!({})).await;
    assert_eq!(seeded["seeded"], json!([]));

    let (status, en) = app
        .put(
            "/api/translations/en",
            Some(&token),
            json!({ "entries": { "app.title": "Pre-Registration", "custom.key": "Hello" } }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(en["entries"]["app.title"], "Pre-Registration");
    assert_eq!(en["entries"]["custom.key"], "Hello");
    assert_eq!(en["entries"]["queue.paid"], "Paid");

    let (_, all) = app.get("/api/translations", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

// ========== Users ==========

#[tokio::test]
async fn users_are_admin_managed_and_last_admin_is_protected() {
    let app = TestApp::new().await;
    let token = app.admin_token();

    let (status, staff) = app
        .post(
            "/api/users",
            Some(&token),
            json!({ "username": "clerk", "password": "secret", "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{staff}");
    assert_eq!(staff["display_name"], "clerk");

    let (status, body) = app
        .post(
            "/api/users",
            Some(&token),
            json!({ "username": "clerk", "password": "other", "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), ErrorCode::UsernameExists.code() as u64);

    let (status, _) = app
        .post(
            "/api/users",
            Some(&token),
            json!({ "username": "boss", "password": "x", "role": "owner" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, users) = app.get("/api/users", Some(&token)).await;
    let admin_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["role"] == "admin")
        .and_then(|u| u["id"].as_str())
        .unwrap()
        .to_string();

    let (status, body) = app.delete(&format!("/api/users/{admin_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), ErrorCode::CannotDeleteAdmin.code() as u64);

    let staff_id = staff["id"].as_str().unwrap();
    let (status, deleted) = app.delete(&format!("/api/users/{staff_id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, true);
}
