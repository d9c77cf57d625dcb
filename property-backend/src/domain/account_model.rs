// property-backend/src/domain/account_model.rs

use super::account_role::{AccountRole, ApprovalState};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    #[serde(skip_serializing)] // パスワードハッシュは絶対にシリアライズしない
    pub password_hash: String,

    pub role: String,

    #[sea_orm(nullable)]
    pub approval_status: Option<String>,

    #[serde(skip_serializing)]
    #[sea_orm(nullable)]
    pub approval_token_hash: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::landlord_model::Entity")]
    Landlord,

    #[sea_orm(has_one = "super::tenant_model::Entity")]
    Tenant,
}

impl Related<super::landlord_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Landlord.def()
    }
}

impl Related<super::tenant_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 保存されているロール文字列を解析
    pub fn role(&self) -> Result<AccountRole, String> {
        self.role.parse()
    }

    /// 保存されている承認状態を解析（管理者以外は None）
    pub fn approval_state(&self) -> Result<Option<ApprovalState>, String> {
        self.approval_status
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}

/// 認可パイプラインが扱うアカウント情報
///
/// ロールに応じて landlord / tenant との関連を保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub approval_state: Option<ApprovalState>,
    pub landlord_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// DBモデルと関連IDからアカウントを組み立てる
    pub fn from_model(
        model: Model,
        landlord_id: Option<Uuid>,
        tenant_id: Option<Uuid>,
    ) -> Result<Self, String> {
        let role = model.role()?;
        let approval_state = model.approval_state()?;

        Ok(Self {
            id: model.id,
            email: model.email,
            role,
            approval_state,
            landlord_id,
            tenant_id,
            created_at: model.created_at,
        })
    }

    /// 承認待ちの管理者かチェック
    pub fn is_pending_admin(&self) -> bool {
        self.role == AccountRole::Admin && self.approval_state != Some(ApprovalState::Approved)
    }

    /// 指定ロールを実際に保持しているか
    ///
    /// 承認待ちの管理者は admin ロールを保持していないものとして扱う。
    pub fn holds_role(&self, role: AccountRole) -> bool {
        if self.role != role {
            return false;
        }
        role != AccountRole::Admin || self.approval_state == Some(ApprovalState::Approved)
    }
}
