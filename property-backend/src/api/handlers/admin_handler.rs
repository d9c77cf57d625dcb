// property-backend/src/api/handlers/admin_handler.rs

use crate::api::dto::admin_dto::{AdminApprovalResponse, AdminRegisterRequest};
use crate::api::dto::auth_dto::AccountResponse;
use crate::api::AppState;
use crate::error::AppResult;
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

/// 承認待ち管理者の登録。承認リンクは通知コンポーネントに渡される
pub async fn register_admin_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<AdminRegisterRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "admin_handler::register"))?;

    let account = app_state
        .admin_approval
        .register_pending_admin(&payload.email, &payload.password)
        .await?;

    Ok(ApiResponse::created(AccountResponse::from(account))
        .with_message("Registration received. The account is pending approval"))
}

/// 承認リンクの遷移先
pub async fn approve_admin_handler(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<ApiResponse<AdminApprovalResponse>> {
    let account = app_state.admin_approval.approve(&token).await?;

    Ok(ApiResponse::success(AdminApprovalResponse {
        account: account.into(),
    })
    .with_message("Admin account approved"))
}

pub fn admin_router(app_state: AppState) -> Router {
    Router::new()
        .route("/admin/register", post(register_admin_handler))
        .route("/admin/approve/{token}", get(approve_admin_handler))
        .with_state(app_state)
}
