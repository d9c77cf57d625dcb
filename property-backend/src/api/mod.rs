// property-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::logging::{inject_request_context, logging_middleware};
use crate::repository::{
    account_repository::{AccountRepository, AccountStore},
    property_repository::{PropertyRepository, PropertyStore},
    rent_term_repository::{RentTermRepository, RentTermStore},
    subscription_repository::{SubscriptionRepository, SubscriptionStore},
};
use crate::service::{
    account_resolver::AccountResolver,
    admin_approval::{AdminApprovalService, ApprovalNotifier, LogApprovalNotifier},
    auth_service::AuthService,
    authorization::AuthorizationPipeline,
    property_service::PropertyService,
    rent_ledger::RentLedger,
    subscription_gate::SubscriptionGate,
    subscription_service::SubscriptionService,
};
use crate::utils::credential::CredentialCodec;
use crate::utils::password::{Argon2Config, PasswordManager, PasswordPolicy};
use axum::{
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod dto;
pub mod handlers;

/// ストアの実装一式
///
/// 本番では sea-orm のリポジトリ、テストではインメモリ実装を渡す。
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub properties: Arc<dyn PropertyStore>,
    pub rent_terms: Arc<dyn RentTermStore>,
}

impl Stores {
    pub fn from_db(db: DbPool) -> Self {
        Self {
            accounts: Arc::new(AccountRepository::new(db.clone())),
            subscriptions: Arc::new(SubscriptionRepository::new(db.clone())),
            properties: Arc::new(PropertyRepository::new(db.clone())),
            rent_terms: Arc::new(RentTermRepository::new(db)),
        }
    }
}

/// Cookie設定
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub access_token_name: String,
    pub secure: bool,
    pub http_only: bool,
    pub path: String,
}

impl CookieConfig {
    pub fn from_app_config(app_config: &AppConfig) -> Self {
        Self {
            access_token_name: app_config.security.access_token_cookie_name.clone(),
            secure: app_config.security.cookie_secure,
            http_only: true,
            path: "/".to_string(),
        }
    }
}

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub admin_approval: Arc<AdminApprovalService>,
    pub property_service: Arc<PropertyService>,
    pub rent_ledger: Arc<RentLedger>,
    pub subscription_service: Arc<SubscriptionService>,
    pub authorization: Arc<AuthorizationPipeline>,
    pub cookie_config: CookieConfig,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// 承認リンクはログに出力する
    pub fn new(stores: Stores, app_config: &AppConfig) -> Result<Self, String> {
        Self::with_notifier(stores, app_config, Arc::new(LogApprovalNotifier))
    }

    pub fn with_notifier(
        stores: Stores,
        app_config: &AppConfig,
        notifier: Arc<dyn ApprovalNotifier>,
    ) -> Result<Self, String> {
        let codec = Arc::new(
            CredentialCodec::new(app_config.credential.clone()).map_err(|e| e.to_string())?,
        );

        let argon2_config = if app_config.is_test() {
            Argon2Config::for_testing()
        } else {
            Argon2Config::default()
        };
        let password_manager = Arc::new(
            PasswordManager::new(argon2_config, PasswordPolicy::default())
                .map_err(|e| e.to_string())?,
        );

        let gate = SubscriptionGate::new(
            stores.subscriptions.clone(),
            Arc::new(app_config.subscription_policy.clone()),
        );

        let authorization = Arc::new(AuthorizationPipeline::new(
            codec.clone(),
            AccountResolver::new(stores.accounts.clone()),
            stores.properties.clone(),
            gate.clone(),
        ));

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                stores.accounts.clone(),
                password_manager.clone(),
                codec,
            )),
            admin_approval: Arc::new(AdminApprovalService::new(
                stores.accounts.clone(),
                password_manager,
                notifier,
                app_config.frontend_url.clone(),
            )),
            property_service: Arc::new(PropertyService::new(
                stores.properties.clone(),
                stores.accounts.clone(),
            )),
            rent_ledger: Arc::new(RentLedger::new(
                stores.rent_terms.clone(),
                stores.properties.clone(),
            )),
            subscription_service: Arc::new(SubscriptionService::new(
                stores.subscriptions,
                stores.accounts,
                gate,
            )),
            authorization,
            cookie_config: CookieConfig::from_app_config(app_config),
            config: Arc::new(app_config.clone()),
        })
    }
}

/// 全ルートとミドルウェアを組み立てる
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .merge(handlers::system_handler::system_router(state.clone()))
        .merge(handlers::auth_handler::auth_router(state.clone()))
        .merge(handlers::admin_handler::admin_router(state.clone()))
        .merge(handlers::property_handler::property_router(state.clone()))
        .merge(handlers::rent_handler::rent_router(state.clone()))
        .merge(handlers::subscription_handler::subscription_router(state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
