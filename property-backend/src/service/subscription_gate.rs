// property-backend/src/service/subscription_gate.rs

use crate::domain::subscription_model;
use crate::domain::subscription_status::{SubscriptionPolicy, SubscriptionStatus};
use crate::error::AppResult;
use crate::repository::subscription_repository::SubscriptionStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// ゲート判定の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Permitted,
    NoSubscription,
    Inactive,
    Blocked { status: SubscriptionStatus },
    UnknownStatus { status: String },
}

impl GateDecision {
    /// 最新スナップショットとポリシーから判定する
    ///
    /// スナップショットが無い、または状態を解釈できない場合は拒否する。
    pub fn evaluate(
        latest: Option<&subscription_model::Model>,
        policy: &SubscriptionPolicy,
    ) -> Self {
        let Some(snapshot) = latest else {
            return GateDecision::NoSubscription;
        };

        let Some(status) = snapshot.parsed_status() else {
            return GateDecision::UnknownStatus {
                status: snapshot.status.clone(),
            };
        };

        if !snapshot.is_active {
            return GateDecision::Inactive;
        }

        if policy.is_blocking(status) {
            return GateDecision::Blocked { status };
        }

        GateDecision::Permitted
    }

    pub fn is_permitted(&self) -> bool {
        matches!(self, GateDecision::Permitted)
    }
}

/// 大家のサブスクリプション状態がアクセスを許可するか判定する
#[derive(Clone)]
pub struct SubscriptionGate {
    subscriptions: Arc<dyn SubscriptionStore>,
    policy: Arc<SubscriptionPolicy>,
}

impl SubscriptionGate {
    pub fn new(subscriptions: Arc<dyn SubscriptionStore>, policy: Arc<SubscriptionPolicy>) -> Self {
        Self {
            subscriptions,
            policy,
        }
    }

    /// 最新スナップショットと判定結果を返す
    pub async fn current_status(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<(Option<subscription_model::Model>, GateDecision)> {
        let latest = self.subscriptions.latest_for_landlord(landlord_id).await?;
        let decision = GateDecision::evaluate(latest.as_ref(), &self.policy);
        Ok((latest, decision))
    }

    pub async fn is_permitted(&self, landlord_id: Uuid) -> AppResult<bool> {
        let (_, decision) = self.current_status(landlord_id).await?;
        debug!(landlord_id = %landlord_id, decision = ?decision, "Subscription gate evaluated");
        Ok(decision.is_permitted())
    }
}
