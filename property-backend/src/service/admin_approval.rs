// property-backend/src/service/admin_approval.rs

//! 管理者承認ワークフロー
//!
//! pending（トークンあり）→ approved（トークン消去）の一方向のみ。

use crate::domain::account_model::Account;
use crate::domain::account_role::AccountRole;
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::{AccountStore, NewAccount};
use crate::utils::approval_token::{generate_approval_token, hash_approval_token};
use crate::utils::password::PasswordManager;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// 承認リンクの送付先
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    async fn send_approval_link(&self, account: &Account, approval_link: &str) -> AppResult<()>;
}

/// 承認リンクをログに出すだけの通知実装
#[derive(Debug, Default, Clone)]
pub struct LogApprovalNotifier;

#[async_trait]
impl ApprovalNotifier for LogApprovalNotifier {
    async fn send_approval_link(&self, account: &Account, approval_link: &str) -> AppResult<()> {
        info!(
            account_id = %account.id,
            email = %account.email,
            approval_link = %approval_link,
            "Admin approval link issued"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct AdminApprovalService {
    accounts: Arc<dyn AccountStore>,
    password_manager: Arc<PasswordManager>,
    notifier: Arc<dyn ApprovalNotifier>,
    approval_base_url: String,
}

impl AdminApprovalService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        password_manager: Arc<PasswordManager>,
        notifier: Arc<dyn ApprovalNotifier>,
        approval_base_url: String,
    ) -> Self {
        Self {
            accounts,
            password_manager,
            notifier,
            approval_base_url,
        }
    }

    /// 承認待ちの管理者を登録し、承認リンクを通知する
    pub async fn register_pending_admin(&self, email: &str, password: &str) -> AppResult<Account> {
        self.password_manager
            .validate_password_strength(password)
            .map_err(|e| AppError::ValidationError(format!("password: {}", e)))?;

        let password_hash = self
            .password_manager
            .hash_password(password)
            .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?;

        let token = generate_approval_token();
        let account = self
            .accounts
            .create_account(NewAccount {
                email: email.to_string(),
                password_hash,
                role: AccountRole::Admin,
                approval_token_hash: Some(hash_approval_token(&token)),
            })
            .await?;

        let link = self.approval_link(&token);
        self.notifier.send_approval_link(&account, &link).await?;

        info!(account_id = %account.id, "Pending admin registered");
        Ok(account)
    }

    /// トークンに一致する承認待ち管理者を承認する
    ///
    /// 存在しない・使用済みのトークンはどちらも `InvalidToken`。同じトークンで
    /// 同時に呼ばれても成功するのは一件のみ。
    pub async fn approve(&self, token: &str) -> AppResult<Account> {
        if token.trim().is_empty() {
            return Err(AppError::InvalidToken);
        }

        match self
            .accounts
            .approve_pending_admin(&hash_approval_token(token))
            .await?
        {
            Some(account) => {
                info!(account_id = %account.id, "Admin account approved");
                Ok(account)
            }
            None => {
                warn!("Approval attempted with an unknown or used token");
                Err(AppError::InvalidToken)
            }
        }
    }

    pub fn approval_link(&self, token: &str) -> String {
        format!(
            "{}/admin/approve/{}",
            self.approval_base_url.trim_end_matches('/'),
            token
        )
    }
}
