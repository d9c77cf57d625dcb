// property-backend/src/api/handlers/auth_handler.rs

use crate::api::dto::auth_dto::{
    AccountResponse, MeResponse, SigninRequest, SigninResponse, SignupRequest,
};
use crate::api::{AppState, CookieConfig};
use crate::error::AppResult;
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
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;
use validator::Validate;

/// テナント・大家の登録
pub async fn signup_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "auth_handler::signup"))?;

    let account = app_state
        .auth_service
        .signup(&payload.email, &payload.password, payload.role)
        .await?;

    Ok(ApiResponse::created(AccountResponse::from(account))
        .with_message("Registration successful"))
}

/// サインイン。資格情報はレスポンス本文とHttpOnlyクッキーの両方で返す
pub async fn signin_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "auth_handler::signin"))?;

    let signed_in = app_state
        .auth_service
        .signin(&payload.email, &payload.password)
        .await?;

    let jar = CookieJar::new().add(access_token_cookie(
        &app_state.cookie_config,
        signed_in.token.clone(),
        signed_in.expires_in,
    ));

    let body = SigninResponse {
        account: signed_in.account.into(),
        access_token: signed_in.token,
        token_type: "Bearer".to_string(),
        expires_in: signed_in.expires_in,
    };

    Ok((jar, ApiResponse::success(body)))
}

/// サインアウト。資格情報はステートレスなのでクッキーを消すだけ
pub async fn signout_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let jar = CookieJar::new().add(access_token_cookie(&app_state.cookie_config, String::new(), 0));
    info!("Access token cookie cleared");
    (jar, ApiResponse::success(()).with_message("Signed out"))
}

pub async fn me_handler(context: AuthContext) -> AppResult<ApiResponse<MeResponse>> {
    Ok(ApiResponse::success(MeResponse {
        landlord_id: context.landlord_id,
        account: context.account.into(),
    }))
}

fn access_token_cookie(config: &CookieConfig, value: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((config.access_token_name.clone(), value))
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

// --- ルーター ---

pub fn auth_router(app_state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/auth/me", get(me_handler))
        .route_layer(require_access!(app_state, AccessRequirement::any_authenticated()));

    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/signin", post(signin_handler))
        .route("/auth/signout", post(signout_handler))
        .merge(authenticated)
        .with_state(app_state)
}
