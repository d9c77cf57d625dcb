// property-backend/src/service/auth_service.rs

use crate::domain::account_model::Account;
use crate::domain::account_role::AccountRole;
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::{AccountStore, NewAccount};
use crate::utils::credential::CredentialCodec;
use crate::utils::password::PasswordManager;
use std::sync::Arc;
use tracing::{info, warn};

/// サインイン結果
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub account: Account,
    pub token: String,
    pub expires_in: i64,
}

/// 認証サービス
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    password_manager: Arc<PasswordManager>,
    codec: Arc<CredentialCodec>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        password_manager: Arc<PasswordManager>,
        codec: Arc<CredentialCodec>,
    ) -> Self {
        Self {
            accounts,
            password_manager,
            codec,
        }
    }

    /// テナントまたは大家のアカウントを登録
    pub async fn signup(&self, email: &str, password: &str, role: AccountRole) -> AppResult<Account> {
        if role == AccountRole::Admin {
            return Err(AppError::BadRequest(
                "Admin accounts are created through admin registration".to_string(),
            ));
        }

        self.password_manager
            .validate_password_strength(password)
            .map_err(|e| AppError::ValidationError(format!("password: {}", e)))?;

        let password_hash = self
            .password_manager
            .hash_password(password)
            .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?;

        let account = self
            .accounts
            .create_account(NewAccount {
                email: email.to_string(),
                password_hash,
                role,
                approval_token_hash: None,
            })
            .await?;

        info!(
            account_id = %account.id,
            role = %account.role,
            "Account registered"
        );

        Ok(account)
    }

    /// メールアドレスとパスワードで認証し、資格情報を発行する
    pub async fn signin(&self, email: &str, password: &str) -> AppResult<SignedIn> {
        let login = match self.accounts.find_login_by_email(email).await? {
            Some(login) => login,
            None => {
                warn!("Sign-in attempted for unknown email");
                return Err(AppError::Unauthenticated(
                    "Invalid email or password".to_string(),
                ));
            }
        };

        let verified = self
            .password_manager
            .verify_password(password, &login.password_hash)
            .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {}", e)))?;

        if !verified {
            warn!(account_id = %login.account.id, "Sign-in failed: wrong password");
            return Err(AppError::Unauthenticated(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self
            .codec
            .issue(login.account.id)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        info!(account_id = %login.account.id, "Account signed in");

        Ok(SignedIn {
            account: login.account,
            token,
            expires_in: self.codec.ttl_seconds(),
        })
    }
}
