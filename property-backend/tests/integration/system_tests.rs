// tests/integration/system_tests.rs

use crate::common::app_helper::setup_app;
use crate::common::request::{get, response_json};
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check_is_public() {
    let app = setup_app();

    let response = app.send(get("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "property-backend");
}

#[tokio::test]
async fn test_system_info_requires_approved_admin() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;

    let response = app
        .send(get("/admin/system/info", Some(&landlord.token)))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = app.approved_admin("boss@example.com").await;
    let response = app.send(get("/admin/system/info", Some(&admin_token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["is_test"], true);
    assert_eq!(
        json["data"]["blocking_subscription_statuses"],
        serde_json::json!(["past_due", "paused"])
    );
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_app();

    let response = app.send(get("/health", None)).await;

    assert!(response.headers().contains_key("x-request-id"));
}
