// property-backend/src/api/handlers/property_handler.rs

use crate::api::dto::property_dto::{
    CreatePropertyRequest, CreateTenancyRequest, PropertyResponse, TenancyResponse,
};
use crate::api::AppState;
use crate::domain::account_role::AccountRole;
use crate::error::AppResult;
use crate::extractors::ValidatedUuid;
use crate::require_access;
use crate::service::authorization::{AccessRequirement, AuthContext};
use crate::types::ApiResponse;
use crate::utils::error_helper::convert_validation_errors;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use validator::Validate;

pub async fn create_property_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
    Json(payload): Json<CreatePropertyRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "property_handler::create_property"))?;

    let landlord_id = context.require_landlord_id()?;
    let property = app_state
        .property_service
        .create_property(landlord_id, &payload.address)
        .await?;

    Ok(ApiResponse::created(PropertyResponse::from(property)))
}

pub async fn list_properties_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
) -> AppResult<ApiResponse<Vec<PropertyResponse>>> {
    let landlord_id = context.require_landlord_id()?;
    let properties = app_state
        .property_service
        .list_properties(landlord_id)
        .await?;

    Ok(ApiResponse::success(
        properties.into_iter().map(PropertyResponse::from).collect(),
    ))
}

pub async fn create_tenancy_handler(
    State(app_state): State<AppState>,
    context: AuthContext,
    ValidatedUuid(property_id): ValidatedUuid,
    Json(payload): Json<CreateTenancyRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "property_handler::create_tenancy"))?;

    let landlord_id = context.require_landlord_id()?;
    let tenancy = app_state
        .property_service
        .create_tenancy(landlord_id, property_id, &payload.tenant_email)
        .await?;

    Ok(ApiResponse::created(TenancyResponse::from(tenancy)))
}

pub fn property_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/landlord/properties",
            post(create_property_handler).get(list_properties_handler),
        )
        .route(
            "/landlord/properties/{property_id}/tenancies",
            post(create_tenancy_handler),
        )
        .route_layer(require_access!(
            app_state,
            AccessRequirement::role(AccountRole::Landlord).landlord_scoped()
        ))
        .with_state(app_state)
}
