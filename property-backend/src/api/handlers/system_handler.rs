// property-backend/src/api/handlers/system_handler.rs

use crate::api::AppState;
use crate::domain::account_role::AccountRole;
use crate::error::AppResult;
use crate::require_access;
use crate::service::authorization::AccessRequirement;
use crate::types::ApiResponse;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemInfoResponse {
    pub environment: String,
    pub is_test: bool,
    pub is_production: bool,
    pub is_development: bool,
    pub blocking_subscription_statuses: Vec<String>,
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn get_system_info(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<SystemInfoResponse>> {
    let config = &app_state.config;

    let mut blocking: Vec<String> = config
        .subscription_policy
        .blocking_statuses()
        .map(|status| status.as_str().to_string())
        .collect();
    blocking.sort();

    Ok(ApiResponse::success(SystemInfoResponse {
        environment: config.environment.clone(),
        is_test: config.is_test(),
        is_production: config.is_production(),
        is_development: config.is_development(),
        blocking_subscription_statuses: blocking,
    }))
}

pub fn system_router(app_state: AppState) -> Router {
    let admin_only = Router::new()
        .route("/admin/system/info", get(get_system_info))
        .route_layer(require_access!(
            app_state,
            AccessRequirement::role(AccountRole::Admin)
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(admin_only)
        .with_state(app_state)
}
