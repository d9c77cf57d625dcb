// property-backend/src/middleware/auth.rs

use crate::error::AppError;
use crate::logging::{AuthenticatedAccount, RequestContext};
use crate::service::authorization::{AccessRequirement, AuthContext, AuthorizationPipeline};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::debug;

/// ルートごとの認可設定
#[derive(Clone)]
pub struct AuthGuard {
    pub pipeline: Arc<AuthorizationPipeline>,
    pub access_token_cookie_name: String,
    pub requirement: AccessRequirement,
}

impl AuthGuard {
    pub fn new(
        pipeline: Arc<AuthorizationPipeline>,
        access_token_cookie_name: impl Into<String>,
        requirement: AccessRequirement,
    ) -> Self {
        Self {
            pipeline,
            access_token_cookie_name: access_token_cookie_name.into(),
            requirement,
        }
    }
}

/// 認可ミドルウェアを生成するマクロ
///
/// `$state` は `AppState`。`route_layer` に渡して使う。
#[macro_export]
macro_rules! require_access {
    ($state:expr, $requirement:expr) => {{
        use axum::middleware::from_fn_with_state;
        use $crate::middleware::auth::{auth_middleware, AuthGuard};

        let guard = AuthGuard::new(
            $state.authorization.clone(),
            $state.config.security.access_token_cookie_name.clone(),
            $requirement,
        );
        from_fn_with_state(guard, auth_middleware)
    }};
}

/// 認可パイプラインを実行し、成功時に `AuthContext` をリクエストに付与する
pub async fn auth_middleware(
    State(guard): State<AuthGuard>,
    headers: HeaderMap,
    cookie_jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&headers, &cookie_jar, &guard.access_token_cookie_name);

    let context = guard
        .pipeline
        .authorize(token.as_deref(), guard.requirement)
        .await?;

    let account_id = context.account_id();
    debug!(
        account_id = %account_id,
        path = %request.uri().path(),
        "Authorization passed"
    );

    if let Some(request_context) = request.extensions_mut().get_mut::<RequestContext>() {
        request_context.account_id = Some(account_id);
    }
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;
    response
        .extensions_mut()
        .insert(AuthenticatedAccount(account_id));
    Ok(response)
}

/// Authorization ヘッダー、次にクッキーから資格情報を取り出す
pub fn extract_token(headers: &HeaderMap, cookie_jar: &CookieJar, cookie_name: &str) -> Option<String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    // Cookieからトークンを取得（フォールバック）
    let cookie_token = cookie_jar
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|s| !s.is_empty());

    auth_header.or(cookie_token)
}

// --- Axum Extractors ---

impl<S> axum::extract::FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("No authorization context".to_string()))
    }
}
