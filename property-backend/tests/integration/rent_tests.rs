// tests/integration/rent_tests.rs

use crate::common::app_helper::setup_app;
use crate::common::request::{create_request, get, response_json};
use axum::http::StatusCode;
use chrono::NaiveDate;
use property_backend::domain::rent_term_model::CurrentRent;
use property_backend::domain::subscription_status::SubscriptionStatus;
use property_backend::error::AppError;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_tenant_without_tenancy_has_no_rent() {
    let app = setup_app();
    let tenant = app.tenant("renter@example.com").await;

    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["state"], "no_rent");
}

#[tokio::test]
async fn test_tenancy_without_terms_has_no_rent() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    app.property_with_tenant(&landlord, &tenant.email).await;

    let current = app.state.rent_ledger.current_rent(tenant.tenant_id).await.unwrap();

    assert_eq!(current, CurrentRent::NoRent);
}

#[tokio::test]
async fn test_latest_term_wins() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, tenancy_id) = app.property_with_tenant(&landlord, &tenant.email).await;

    let response = app.append_rent(&landlord, tenancy_id, 100_000, "2025-01-01").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = app.append_rent(&landlord, tenancy_id, 120_000, "2025-02-01").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["state"], "due");
    assert_eq!(json["data"]["amount"], 120_000);
    assert_eq!(json["data"]["due_date"], "2025-02-01");
    assert_eq!(json["data"]["tenancy_id"], tenancy_id.to_string());
}

#[tokio::test]
async fn test_latest_is_by_insertion_order_not_due_date() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, tenancy_id) = app.property_with_tenant(&landlord, &tenant.email).await;

    app.append_rent(&landlord, tenancy_id, 90_000, "2025-06-01").await;
    app.append_rent(&landlord, tenancy_id, 95_000, "2025-03-01").await;

    let current = app.state.rent_ledger.current_rent(tenant.tenant_id).await.unwrap();

    assert_eq!(
        current.amount_and_due_date(),
        Some((95_000, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()))
    );
}

#[tokio::test]
async fn test_rent_history_is_newest_first_and_append_only() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, tenancy_id) = app.property_with_tenant(&landlord, &tenant.email).await;

    app.append_rent(&landlord, tenancy_id, 100_000, "2025-01-01").await;
    app.append_rent(&landlord, tenancy_id, 110_000, "2025-02-01").await;

    let response = app
        .send(get(
            &format!("/landlord/tenancies/{}/rent-terms", tenancy_id),
            Some(&landlord.token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let history = json["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["amount"], 110_000);
    assert_eq!(history[1]["amount"], 100_000);
    assert_eq!(app.store.rent_term_count(), 2);
}

#[tokio::test]
async fn test_non_positive_amount_is_rejected() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, tenancy_id) = app.property_with_tenant(&landlord, &tenant.email).await;

    let response = app.append_rent(&landlord, tenancy_id, 0, "2025-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = app.append_rent(&landlord, tenancy_id, -500, "2025-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.store.rent_term_count(), 0);
}

#[tokio::test]
async fn test_append_for_unknown_tenancy_is_not_found() {
    let app = setup_app();

    let result = app
        .state
        .rent_ledger
        .append_rent_term(
            Uuid::new_v4(),
            100_000,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_other_landlords_tenancy_is_not_found() {
    let app = setup_app();
    let owner = app.active_landlord("owner@example.com").await;
    let other = app.active_landlord("other@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, tenancy_id) = app.property_with_tenant(&owner, &tenant.email).await;

    let response = app.append_rent(&other, tenancy_id, 100_000, "2025-01-01").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(get(
            &format!("/landlord/tenancies/{}/rent-terms", tenancy_id),
            Some(&other.token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.rent_term_count(), 0);
}

#[tokio::test]
async fn test_rent_view_is_revoked_when_subscription_pauses() {
    let app = setup_app();
    let landlord = app.active_landlord("owner@example.com").await;
    let admin_token = app.approved_admin("boss@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, tenancy_id) = app.property_with_tenant(&landlord, &tenant.email).await;
    app.append_rent(&landlord, tenancy_id, 100_000, "2025-01-01").await;

    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({ "status": "paused", "reason": "payment method expired" });
    let response = app
        .send(create_request(
            "POST",
            &format!("/admin/landlords/{}/subscription", landlord.landlord_id),
            Some(&admin_token),
            Some(&body),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // 同じ資格情報でも次のリクエストから拒否される
    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(json["error_type"], "subscription_required");

    let response = app
        .send(get(
            &format!("/landlord/tenancies/{}/rent-terms", tenancy_id),
            Some(&landlord.token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.record_subscription(landlord.landlord_id, SubscriptionStatus::Active, true)
        .await;
    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rent_of_previous_landlord_is_not_visible() {
    let app = setup_app();
    let previous = app.active_landlord("previous@example.com").await;
    let current = app.active_landlord("current@example.com").await;
    let tenant = app.tenant("renter@example.com").await;
    let (_, old_tenancy) = app.property_with_tenant(&previous, &tenant.email).await;
    let (_, new_tenancy) = app.property_with_tenant(&current, &tenant.email).await;

    // 以前の大家の行が全体では最新になる
    let response = app.append_rent(&previous, old_tenancy, 777_000, "2025-05-01").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    app.record_subscription(previous.landlord_id, SubscriptionStatus::Paused, true)
        .await;

    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["state"], "no_rent");
    assert_eq!(
        app.state.rent_ledger.current_rent(tenant.tenant_id).await.unwrap(),
        CurrentRent::NoRent
    );

    app.append_rent(&current, new_tenancy, 120_000, "2025-06-01").await;
    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    let json = response_json(response).await;
    assert_eq!(json["data"]["amount"], 120_000);
    assert_eq!(json["data"]["tenancy_id"], new_tenancy.to_string());

    app.record_subscription(current.landlord_id, SubscriptionStatus::Paused, true)
        .await;
    let response = app.send(get("/tenant/rent", Some(&tenant.token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert_eq!(json["error_type"], "subscription_required");
}

#[tokio::test]
async fn test_rent_lookup_during_outage_is_unavailable() {
    let app = setup_app();
    let tenant = app.tenant("renter@example.com").await;

    app.store.set_unavailable(true);
    let result = app.state.rent_ledger.current_rent(tenant.tenant_id).await;
    app.store.set_unavailable(false);

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
}
