// tests/integration/admin_approval_tests.rs

use crate::common::app_helper::{setup_app, TEST_PASSWORD};
use crate::common::request::{create_request, get, response_json};
use axum::http::StatusCode;
use property_backend::error::AppError;
use property_backend::utils::approval_token::hash_approval_token;
use serde_json::json;
use std::sync::Arc;

async fn register(app: &crate::common::app_helper::TestApp, email: &str) -> String {
    let body = json!({ "email": email, "password": TEST_PASSWORD });
    let response = app
        .send(create_request("POST", "/admin/register", None, Some(&body)))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    app.notifier.token_for(email).unwrap()
}

#[tokio::test]
async fn test_register_creates_pending_admin_and_sends_link() {
    let app = setup_app();

    let body = json!({ "email": "boss@example.com", "password": TEST_PASSWORD });
    let response = app
        .send(create_request("POST", "/admin/register", None, Some(&body)))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["approval_state"], "pending");
    assert_eq!(app.notifier.sent_count(), 1);

    // 保存されるのはトークンのハッシュのみ
    let account_id = json["data"]["id"].as_str().unwrap().parse().unwrap();
    let token = app.notifier.token_for("boss@example.com").unwrap();
    let stored = app.store.approval_token_hash(account_id).unwrap();
    assert_ne!(stored, token);
    assert_eq!(stored, hash_approval_token(&token));
}

#[tokio::test]
async fn test_pending_admin_is_forbidden() {
    let app = setup_app();
    register(&app, "boss@example.com").await;
    let token = app.signin("boss@example.com").await;

    let response = app.send(get("/admin/system/info", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(json["error_type"], "forbidden");
    assert_eq!(json["message"], "Admin approval is still pending");
}

#[tokio::test]
async fn test_approval_grants_admin_access() {
    let app = setup_app();
    let approval_token = register(&app, "boss@example.com").await;
    let token = app.signin("boss@example.com").await;

    let response = app
        .send(get(&format!("/admin/approve/{}", approval_token), None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["account"]["approval_state"], "approved");

    // 既存の資格情報でも承認後は通る
    let response = app.send(get("/admin/system/info", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_approval_token_is_single_use() {
    let app = setup_app();
    let approval_token = register(&app, "boss@example.com").await;

    let first = app
        .send(get(&format!("/admin/approve/{}", approval_token), None))
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .send(get(&format!("/admin/approve/{}", approval_token), None))
        .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    let json = response_json(second).await;
    assert_eq!(json["error_type"], "invalid_token");
}

#[tokio::test]
async fn test_unknown_approval_token_is_rejected() {
    let app = setup_app();
    register(&app, "boss@example.com").await;

    let response = app.send(get("/admin/approve/not-a-real-token", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["error_type"], "invalid_token");
}

#[tokio::test]
async fn test_concurrent_approvals_succeed_exactly_once() {
    let app = setup_app();
    let approval_token = register(&app, "boss@example.com").await;
    let service = Arc::clone(&app.state.admin_approval);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let token = approval_token.clone();
            tokio::spawn(async move { service.approve(&token).await })
        })
        .collect();

    let mut approved = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => approved += 1,
            Err(AppError::InvalidToken) => rejected += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(approved, 1);
    assert_eq!(rejected, 7);
}

#[tokio::test]
async fn test_approval_while_store_unavailable_is_not_invalid_token() {
    let app = setup_app();
    let approval_token = register(&app, "boss@example.com").await;

    app.store.set_unavailable(true);
    let result = app.state.admin_approval.approve(&approval_token).await;
    app.store.set_unavailable(false);

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));

    // 失敗した試行でトークンは消費されない
    assert!(app.state.admin_approval.approve(&approval_token).await.is_ok());
}

#[tokio::test]
async fn test_approval_link_uses_configured_base_url() {
    let app = setup_app();

    let link = app.state.admin_approval.approval_link("abc");

    assert_eq!(
        link,
        format!(
            "{}/admin/approve/abc",
            app.config.frontend_url.trim_end_matches('/')
        )
    );
}
