// property-backend/src/service/subscription_service.rs

use super::subscription_gate::{GateDecision, SubscriptionGate};
use crate::domain::subscription_model::{self, NewSubscriptionSnapshot};
use crate::domain::subscription_status::SubscriptionStatus;
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::AccountStore;
use crate::repository::subscription_repository::SubscriptionStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 大家から見たサブスクリプション状態
#[derive(Debug, Clone)]
pub struct SubscriptionOverview {
    pub latest: Option<subscription_model::Model>,
    pub decision: GateDecision,
}

#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: Arc<dyn SubscriptionStore>,
    accounts: Arc<dyn AccountStore>,
    gate: SubscriptionGate,
}

impl SubscriptionService {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        accounts: Arc<dyn AccountStore>,
        gate: SubscriptionGate,
    ) -> Self {
        Self {
            subscriptions,
            accounts,
            gate,
        }
    }

    pub async fn overview(&self, landlord_id: Uuid) -> AppResult<SubscriptionOverview> {
        let (latest, decision) = self.gate.current_status(landlord_id).await?;
        Ok(SubscriptionOverview { latest, decision })
    }

    /// 状態スナップショットを追記する
    pub async fn record_status(
        &self,
        landlord_id: Uuid,
        status: SubscriptionStatus,
        is_active: bool,
        reason: Option<String>,
        recorded_by: Uuid,
    ) -> AppResult<subscription_model::Model> {
        self.ensure_landlord(landlord_id).await?;

        let snapshot = self
            .subscriptions
            .append(NewSubscriptionSnapshot {
                landlord_id,
                status,
                is_active,
                reason,
            })
            .await?;

        info!(
            landlord_id = %landlord_id,
            status = %status,
            is_active = is_active,
            recorded_by = %recorded_by,
            "Subscription snapshot recorded"
        );

        Ok(snapshot)
    }

    /// 履歴（新しい順）
    pub async fn history(&self, landlord_id: Uuid) -> AppResult<Vec<subscription_model::Model>> {
        self.ensure_landlord(landlord_id).await?;
        self.subscriptions.history_for_landlord(landlord_id).await
    }

    async fn ensure_landlord(&self, landlord_id: Uuid) -> AppResult<()> {
        if self.accounts.landlord_exists(landlord_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Landlord not found".to_string()))
        }
    }
}
