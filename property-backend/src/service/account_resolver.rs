// property-backend/src/service/account_resolver.rs

use crate::domain::account_model::Account;
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::AccountStore;
use std::sync::Arc;
use uuid::Uuid;

/// 検証済みのアカウントIDをアカウント情報に解決する
///
/// 承認状態はデータとして返すだけで、承認待ち管理者の扱いは呼び出し側が決める。
#[derive(Clone)]
pub struct AccountResolver {
    accounts: Arc<dyn AccountStore>,
}

impl AccountResolver {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// 存在しなければ `NotFound`。ストア障害は `StoreUnavailable` のまま返す
    pub async fn resolve(&self, account_id: Uuid) -> AppResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", account_id)))
    }
}
