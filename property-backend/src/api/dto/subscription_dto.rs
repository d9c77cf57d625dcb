// property-backend/src/api/dto/subscription_dto.rs

use crate::domain::subscription_model;
use crate::service::subscription_gate::GateDecision;
use crate::service::subscription_service::SubscriptionOverview;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 管理者によるサブスクリプション状態の記録
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordSubscriptionRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,

    #[serde(default = "default_is_active")]
    pub is_active: bool,

    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

fn default_is_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionSnapshotResponse {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub status: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<subscription_model::Model> for SubscriptionSnapshotResponse {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            id: model.id,
            landlord_id: model.landlord_id,
            status: model.status,
            is_active: model.is_active,
            reason: model.reason,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionOverviewResponse {
    pub permitted: bool,
    pub decision: GateDecision,
    pub current: Option<SubscriptionSnapshotResponse>,
}

impl From<SubscriptionOverview> for SubscriptionOverviewResponse {
    fn from(overview: SubscriptionOverview) -> Self {
        Self {
            permitted: overview.decision.is_permitted(),
            decision: overview.decision,
            current: overview.latest.map(Into::into),
        }
    }
}
