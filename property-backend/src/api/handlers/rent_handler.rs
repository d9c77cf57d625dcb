// property-backend/src/api/handlers/rent_handler.rs

use crate::api::dto::rent_dto::{AppendRentTermRequest, RentTermResponse};
use crate::api::AppState;
use crate::domain::account_role::AccountRole;
use crate::domain::rent_term_model::CurrentRent;
use crate::error::AppResult;
use crate::extractors::ValidatedUuid;
use crate::require_access;
use crate::service::authorization::{AccessRequirement, AuthContext};
use crate::types::ApiResponse;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

/// テナント自身の現在の家賃。テナンシーはゲート判定に使われたものに限る
pub async fn current_rent_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
) -> AppResult<ApiResponse<CurrentRent>> {
    context.require_tenant_id()?;
    let current = app_state
        .rent_ledger
        .current_rent_in(context.tenancy_id)
        .await?;
    Ok(ApiResponse::success(current))
}

pub async fn append_rent_term_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
    ValidatedUuid(tenancy_id): ValidatedUuid,
    Json(payload): Json<AppendRentTermRequest>,
) -> AppResult<impl IntoResponse> {
    let landlord_id = context.require_landlord_id()?;
    app_state
        .rent_ledger
        .tenancy_for_landlord(landlord_id, tenancy_id)
        .await?;

    let term = app_state
        .rent_ledger
        .append_rent_term(tenancy_id, payload.amount, payload.due_date)
        .await?;

    Ok(ApiResponse::created(RentTermResponse::from(term)))
}

pub async fn rent_history_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
    ValidatedUuid(tenancy_id): ValidatedUuid,
) -> AppResult<ApiResponse<Vec<RentTermResponse>>> {
    let landlord_id = context.require_landlord_id()?;
    app_state
        .rent_ledger
        .tenancy_for_landlord(landlord_id, tenancy_id)
        .await?;

    let history = app_state.rent_ledger.rent_history(tenancy_id).await?;
    Ok(ApiResponse::success(
        history.into_iter().map(RentTermResponse::from).collect(),
    ))
}

pub fn rent_router(app_state: AppState) -> Router {
    let tenant_routes = Router::new()
        .route("/tenant/rent", get(current_rent_handler))
        .route_layer(require_access!(
            app_state,
            AccessRequirement::role(AccountRole::Tenant).landlord_scoped()
        ));

    let landlord_routes = Router::new()
        .route(
            "/landlord/tenancies/{tenancy_id}/rent-terms",
            post(append_rent_term_handler).get(rent_history_handler),
        )
        .route_layer(require_access!(
            app_state,
            AccessRequirement::role(AccountRole::Landlord).landlord_scoped()
        ));

    Router::new()
        .merge(tenant_routes)
        .merge(landlord_routes)
        .with_state(app_state)
}
