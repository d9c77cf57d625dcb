// property-backend/src/api/handlers/subscription_handler.rs

use crate::api::dto::subscription_dto::{
    RecordSubscriptionRequest, SubscriptionOverviewResponse, SubscriptionSnapshotResponse,
};
use crate::api::AppState;
use crate::domain::account_role::AccountRole;
use crate::domain::subscription_status::SubscriptionStatus;
use crate::error::{AppError, AppResult};
use crate::extractors::ValidatedUuid;
use crate::require_access;
use crate::service::authorization::{AccessRequirement, AuthContext};
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

/// 大家自身のサブスクリプション状態。ゲートで拒否されている理由を確認できるようゲートしない
pub async fn landlord_subscription_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
) -> AppResult<ApiResponse<SubscriptionOverviewResponse>> {
    let landlord_id = context.require_landlord_id()?;
    let overview = app_state.subscription_service.overview(landlord_id).await?;
    Ok(ApiResponse::success(overview.into()))
}

pub async fn record_subscription_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
    ValidatedUuid(landlord_id): ValidatedUuid,
    Json(payload): Json<RecordSubscriptionRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "subscription_handler::record"))?;

    let status: SubscriptionStatus = payload
        .status
        .parse()
        .map_err(|e: String| AppError::ValidationError(format!("status: {}", e)))?;

    let snapshot = app_state
        .subscription_service
        .record_status(
            landlord_id,
            status,
            payload.is_active,
            payload.reason,
            context.account_id(),
        )
        .await?;

    Ok(ApiResponse::created(SubscriptionSnapshotResponse::from(
        snapshot,
    )))
}

pub async fn subscription_history_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(landlord_id): ValidatedUuid,
) -> AppResult<ApiResponse<Vec<SubscriptionSnapshotResponse>>> {
    let history = app_state.subscription_service.history(landlord_id).await?;
    Ok(ApiResponse::success(
        history
            .into_iter()
            .map(SubscriptionSnapshotResponse::from)
            .collect(),
    ))
}

pub fn subscription_router(app_state: AppState) -> Router {
    let landlord_routes = Router::new()
        .route("/landlord/subscription", get(landlord_subscription_handler))
        .route_layer(require_access!(
            app_state,
            AccessRequirement::role(AccountRole::Landlord)
        ));

    let admin_routes = Router::new()
        .route(
            "/admin/landlords/{landlord_id}/subscription",
            post(record_subscription_handler),
        )
        .route(
            "/admin/landlords/{landlord_id}/subscription/history",
            get(subscription_history_handler),
        )
        .route_layer(require_access!(
            app_state,
            AccessRequirement::role(AccountRole::Admin)
        ));

    Router::new()
        .merge(landlord_routes)
        .merge(admin_routes)
        .with_state(app_state)
}
