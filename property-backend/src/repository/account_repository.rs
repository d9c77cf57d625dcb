// property-backend/src/repository/account_repository.rs

use super::transaction_error;
use crate::domain::account_model::{
    self, Account, ActiveModel as AccountActiveModel, Entity as AccountEntity,
};
use crate::domain::account_role::{AccountRole, ApprovalState};
use crate::domain::landlord_model::{self, Entity as LandlordEntity};
use crate::domain::tenant_model::{self, Entity as TenantEntity};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, DbConn, QueryFilter, Set, SqlErr, TransactionTrait};
use uuid::Uuid;

/// 新規アカウントの作成内容
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    /// 管理者の場合のみ。承認トークンのSHA-256ハッシュ
    pub approval_token_hash: Option<String>,
}

/// サインイン照合用
#[derive(Debug, Clone)]
pub struct AccountLogin {
    pub account: Account,
    pub password_hash: String,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// IDでアカウントを検索（landlord / tenant の紐付けを含む）
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// サインイン用にパスワードハッシュ付きで検索
    async fn find_login_by_email(&self, email: &str) -> AppResult<Option<AccountLogin>>;

    /// アカウントと、ロールに応じた landlord / tenant 行を作成
    async fn create_account(&self, new_account: NewAccount) -> AppResult<Account>;

    /// 承認待ち管理者を承認済みにする
    ///
    /// トークンハッシュと pending 状態の両方に一致する行だけを一度の条件付き更新で
    /// 遷移させる。一致しなければ None。
    async fn approve_pending_admin(&self, token_hash: &str) -> AppResult<Option<Account>>;

    async fn landlord_exists(&self, landlord_id: Uuid) -> AppResult<bool>;
}

#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DbConn,
}

impl AccountRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn attach_links<C: ConnectionTrait>(
        conn: &C,
        model: account_model::Model,
    ) -> AppResult<Account> {
        let role = model.role().map_err(AppError::InternalServerError)?;

        let (landlord_id, tenant_id) = match role {
            AccountRole::Landlord => {
                let landlord = LandlordEntity::find()
                    .filter(landlord_model::Column::AccountId.eq(model.id))
                    .one(conn)
                    .await?;
                (landlord.map(|l| l.id), None)
            }
            AccountRole::Tenant => {
                let tenant = TenantEntity::find()
                    .filter(tenant_model::Column::AccountId.eq(model.id))
                    .one(conn)
                    .await?;
                (None, tenant.map(|t| t.id))
            }
            AccountRole::Admin => (None, None),
        };

        Account::from_model(model, landlord_id, tenant_id).map_err(AppError::InternalServerError)
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        match AccountEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(Self::attach_links(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let model = AccountEntity::find()
            .filter(account_model::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(Some(Self::attach_links(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn find_login_by_email(&self, email: &str) -> AppResult<Option<AccountLogin>> {
        let model = AccountEntity::find()
            .filter(account_model::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => {
                let password_hash = model.password_hash.clone();
                let account = Self::attach_links(&self.db, model).await?;
                Ok(Some(AccountLogin {
                    account,
                    password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn create_account(&self, new_account: NewAccount) -> AppResult<Account> {
        self.db
            .transaction::<_, Account, AppError>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let approval_status = (new_account.role == AccountRole::Admin)
                        .then(|| ApprovalState::Pending.as_str().to_string());

                    let active = AccountActiveModel {
                        id: Set(Uuid::new_v4()),
                        email: Set(new_account.email.to_lowercase()),
                        password_hash: Set(new_account.password_hash),
                        role: Set(new_account.role.as_str().to_string()),
                        approval_status: Set(approval_status),
                        approval_token_hash: Set(new_account.approval_token_hash),
                        created_at: Set(now),
                        updated_at: Set(now),
                    };

                    let model = active.insert(txn).await.map_err(|e| match e.sql_err() {
                        Some(SqlErr::UniqueConstraintViolation(_)) => {
                            AppError::Conflict("Email is already registered".to_string())
                        }
                        _ => AppError::StoreUnavailable(e),
                    })?;

                    match new_account.role {
                        AccountRole::Landlord => {
                            landlord_model::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                account_id: Set(model.id),
                                created_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                        }
                        AccountRole::Tenant => {
                            tenant_model::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                account_id: Set(model.id),
                                created_at: Set(now),
                            }
                            .insert(txn)
                            .await?;
                        }
                        AccountRole::Admin => {}
                    }

                    Self::attach_links(txn, model).await
                })
            })
            .await
            .map_err(transaction_error)
    }

    async fn approve_pending_admin(&self, token_hash: &str) -> AppResult<Option<Account>> {
        let updated = AccountEntity::update_many()
            .col_expr(
                account_model::Column::ApprovalStatus,
                Expr::value(ApprovalState::Approved.as_str()),
            )
            .col_expr(
                account_model::Column::ApprovalTokenHash,
                Expr::value(Option::<String>::None),
            )
            .col_expr(account_model::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(account_model::Column::ApprovalTokenHash.eq(token_hash))
            .filter(account_model::Column::ApprovalStatus.eq(ApprovalState::Pending.as_str()))
            .exec_with_returning(&self.db)
            .await?;

        match updated.into_iter().next() {
            Some(model) => Ok(Some(Self::attach_links(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn landlord_exists(&self, landlord_id: Uuid) -> AppResult<bool> {
        let found = LandlordEntity::find_by_id(landlord_id)
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }
}
