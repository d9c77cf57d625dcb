// property-backend/src/repository/subscription_repository.rs

use crate::domain::subscription_model::{
    self, Entity as SubscriptionEntity, NewSubscriptionSnapshot,
};
use crate::error::AppResult;
use async_trait::async_trait;
use sea_orm::entity::*;
use sea_orm::{DbConn, QueryFilter, QueryOrder};
use uuid::Uuid;

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// 作成順序が最新のスナップショット
    async fn latest_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<Option<subscription_model::Model>>;

    /// スナップショットを追記する。既存行は変更しない
    async fn append(&self, snapshot: NewSubscriptionSnapshot)
        -> AppResult<subscription_model::Model>;

    /// 履歴を新しい順に返す
    async fn history_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<Vec<subscription_model::Model>>;
}

#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    db: DbConn,
}

impl SubscriptionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn latest_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<Option<subscription_model::Model>> {
        let latest = SubscriptionEntity::find()
            .filter(subscription_model::Column::LandlordId.eq(landlord_id))
            .order_by_desc(subscription_model::Column::Seq)
            .one(&self.db)
            .await?;
        Ok(latest)
    }

    async fn append(
        &self,
        snapshot: NewSubscriptionSnapshot,
    ) -> AppResult<subscription_model::Model> {
        let model = snapshot.into_active_model().insert(&self.db).await?;
        Ok(model)
    }

    async fn history_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<Vec<subscription_model::Model>> {
        let history = SubscriptionEntity::find()
            .filter(subscription_model::Column::LandlordId.eq(landlord_id))
            .order_by_desc(subscription_model::Column::Seq)
            .all(&self.db)
            .await?;
        Ok(history)
    }
}
