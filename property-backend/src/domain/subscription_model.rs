// property-backend/src/domain/subscription_model.rs

use super::subscription_status::SubscriptionStatus;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// サブスクリプション状態スナップショット
///
/// 追記のみ。大家ごとに seq が最大の行が有効な状態となる。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub seq: i64,

    pub landlord_id: Uuid,

    pub status: String,

    pub is_active: bool,

    #[sea_orm(nullable)]
    pub reason: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::landlord_model::Entity",
        from = "Column::LandlordId",
        to = "super::landlord_model::Column::Id",
        on_delete = "Cascade"
    )]
    Landlord,
}

impl Related<super::landlord_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Landlord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// ステータスを解析。未知の値は None
    pub fn parsed_status(&self) -> Option<SubscriptionStatus> {
        self.status.parse().ok()
    }
}

/// 追記するスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriptionSnapshot {
    pub landlord_id: Uuid,
    pub status: SubscriptionStatus,
    pub is_active: bool,
    pub reason: Option<String>,
}

impl NewSubscriptionSnapshot {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            seq: NotSet,
            landlord_id: Set(self.landlord_id),
            status: Set(self.status.as_str().to_string()),
            is_active: Set(self.is_active),
            reason: Set(self.reason),
            created_at: Set(Utc::now()),
        }
    }
}
