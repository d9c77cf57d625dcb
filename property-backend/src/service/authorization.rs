// property-backend/src/service/authorization.rs

//! リクエスト認可パイプライン
//!
//! 資格情報の検証 → アカウント解決 → ロール確認 → サブスクリプションゲート
//! の順に実行し、失敗した時点で以降のステップは実行しない。

use super::account_resolver::AccountResolver;
use super::subscription_gate::SubscriptionGate;
use crate::domain::account_model::Account;
use crate::domain::account_role::AccountRole;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::property_repository::PropertyStore;
use crate::utils::credential::CredentialCodec;
use crate::utils::error_helper::{forbidden_error, internal_server_error};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 保護された操作が要求する条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRequirement {
    /// None の場合は認証済みであれば良い
    pub role: Option<AccountRole>,
    /// 所有する大家のサブスクリプションでゲートするか
    pub landlord_scoped: bool,
}

impl AccessRequirement {
    pub fn any_authenticated() -> Self {
        Self {
            role: None,
            landlord_scoped: false,
        }
    }

    pub fn role(role: AccountRole) -> Self {
        Self {
            role: Some(role),
            landlord_scoped: false,
        }
    }

    pub fn landlord_scoped(mut self) -> Self {
        self.landlord_scoped = true;
        self
    }
}

/// 認可に成功したリクエストに付与されるコンテキスト
///
/// ハンドラーはスコープ用のIDをここからのみ取得する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub account: Account,
    pub landlord_id: Option<Uuid>,
    /// テナントの場合、ゲート判定に使ったテナンシー
    pub tenancy_id: Option<Uuid>,
}

impl AuthContext {
    pub fn account_id(&self) -> Uuid {
        self.account.id
    }

    /// 大家スコープのIDを要求する
    pub fn require_landlord_id(&self) -> AppResult<Uuid> {
        self.landlord_id.ok_or_else(|| {
            forbidden_error(
                "No landlord is associated with this account",
                "auth_context",
                Some(&self.account.id.to_string()),
            )
        })
    }

    pub fn require_tenant_id(&self) -> AppResult<Uuid> {
        self.account.tenant_id.ok_or_else(|| {
            forbidden_error(
                "No tenant is associated with this account",
                "auth_context",
                Some(&self.account.id.to_string()),
            )
        })
    }
}

#[derive(Clone)]
pub struct AuthorizationPipeline {
    codec: Arc<CredentialCodec>,
    resolver: AccountResolver,
    properties: Arc<dyn PropertyStore>,
    gate: SubscriptionGate,
}

impl AuthorizationPipeline {
    pub fn new(
        codec: Arc<CredentialCodec>,
        resolver: AccountResolver,
        properties: Arc<dyn PropertyStore>,
        gate: SubscriptionGate,
    ) -> Self {
        Self {
            codec,
            resolver,
            properties,
            gate,
        }
    }

    pub async fn authorize(
        &self,
        credential: Option<&str>,
        requirement: AccessRequirement,
    ) -> AppResult<AuthContext> {
        self.authorize_at(credential, requirement, Utc::now()).await
    }

    /// 時刻を指定して認可する
    pub async fn authorize_at(
        &self,
        credential: Option<&str>,
        requirement: AccessRequirement,
        now: DateTime<Utc>,
    ) -> AppResult<AuthContext> {
        // 1. 資格情報の検証
        let token = credential
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthenticated("Missing credential".to_string()))?;

        let account_id = self
            .codec
            .verify_at(token, now)
            .map_err(|e| AppError::Unauthenticated(e.to_string()))?;

        // 2. アカウント解決。存在しない場合はどちらの失敗か区別させない
        let account = match self.resolver.resolve(account_id).await {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthenticated(
                    "Credential subject does not resolve to an account".to_string(),
                ))
            }
            Err(e) => return Err(e),
        };

        // 3. ロール確認
        if let Some(role) = requirement.role {
            if !account.holds_role(role) {
                let message = if account.is_pending_admin() && role == AccountRole::Admin {
                    "Admin approval is still pending"
                } else {
                    "Insufficient role for this operation"
                };
                return Err(forbidden_error(
                    message,
                    "authorization_pipeline",
                    Some(&account.id.to_string()),
                ));
            }
        }

        // 4. サブスクリプションゲート
        let scope = if requirement.landlord_scoped {
            let scope = self.owning_scope(&account).await?;
            if let Some(landlord_id) = scope.landlord_id {
                if !self.gate.is_permitted(landlord_id).await? {
                    log_with_context!(
                        tracing::Level::WARN,
                        "Access denied by subscription gate",
                        "account_id" => account.id,
                        "landlord_id" => landlord_id,
                        "tenancy_id" => scope.tenancy_id
                    );
                    return Err(AppError::SubscriptionRequired(
                        "The landlord's subscription does not permit access".to_string(),
                    ));
                }
            }
            scope
        } else {
            OwningScope {
                landlord_id: account.landlord_id,
                tenancy_id: None,
            }
        };

        debug!(
            account_id = %account.id,
            role = %account.role,
            landlord_id = ?scope.landlord_id,
            tenancy_id = ?scope.tenancy_id,
            "Request authorized"
        );

        Ok(AuthContext {
            account,
            landlord_id: scope.landlord_id,
            tenancy_id: scope.tenancy_id,
        })
    }

    /// スコープ対象の大家を導出する
    ///
    /// 大家は自身、テナントは最新テナンシーの物件の所有者とそのテナンシー。
    /// テナンシーの無いテナントと管理者はどちらも None。
    async fn owning_scope(&self, account: &Account) -> AppResult<OwningScope> {
        match account.role {
            AccountRole::Landlord => {
                let landlord_id = account.landlord_id.ok_or_else(|| {
                    internal_server_error(
                        format!("landlord account {} has no landlord row", account.id),
                        "authorization_pipeline",
                        "Account linkage is inconsistent",
                    )
                })?;
                Ok(OwningScope {
                    landlord_id: Some(landlord_id),
                    tenancy_id: None,
                })
            }
            AccountRole::Tenant => {
                let latest = match account.tenant_id {
                    Some(tenant_id) => self.properties.latest_tenancy_for_tenant(tenant_id).await?,
                    None => None,
                };
                Ok(OwningScope {
                    landlord_id: latest.as_ref().map(|link| link.landlord_id),
                    tenancy_id: latest.map(|link| link.tenancy_id),
                })
            }
            AccountRole::Admin => Ok(OwningScope::default()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct OwningScope {
    landlord_id: Option<Uuid>,
    tenancy_id: Option<Uuid>,
}
