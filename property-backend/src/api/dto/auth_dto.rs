// property-backend/src/api/dto/auth_dto.rs

use crate::domain::account_model::Account;
use crate::domain::account_role::{AccountRole, ApprovalState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- リクエストDTO ---

/// アカウント登録リクエスト（テナント・大家）
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,

    pub role: AccountRole,
}

/// サインインリクエスト
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// --- レスポンスDTO ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_state: Option<ApprovalState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landlord_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            approval_state: account.approval_state,
            landlord_id: account.landlord_id,
            tenant_id: account.tenant_id,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninResponse {
    pub account: AccountResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// 現在のアカウントと、導出されたスコープ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub account: AccountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landlord_id: Option<Uuid>,
}
