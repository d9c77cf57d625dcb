// property-backend/src/domain/subscription_status.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// サブスクリプションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    Paused,
    PastDue,
    Unpaid,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::Paused => "paused",
            Self::PastDue => "past_due",
            Self::Unpaid => "unpaid",
            Self::Canceled => "canceled",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Active,
            Self::Trialing,
            Self::Paused,
            Self::PastDue,
            Self::Unpaid,
            Self::Canceled,
        ]
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "trialing" => Ok(Self::Trialing),
            "paused" => Ok(Self::Paused),
            "past_due" => Ok(Self::PastDue),
            "unpaid" => Ok(Self::Unpaid),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(format!("Invalid subscription status: {}", s)),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// アクセスを遮断するステータスの集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPolicy {
    blocking: HashSet<SubscriptionStatus>,
}

impl Default for SubscriptionPolicy {
    fn default() -> Self {
        Self::new([SubscriptionStatus::Paused, SubscriptionStatus::PastDue])
    }
}

impl SubscriptionPolicy {
    pub fn new(blocking: impl IntoIterator<Item = SubscriptionStatus>) -> Self {
        Self {
            blocking: blocking.into_iter().collect(),
        }
    }

    /// "paused,past_due" 形式の設定値から作成
    pub fn parse(value: &str) -> Result<Self, String> {
        let blocking = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self { blocking })
    }

    pub fn is_blocking(&self, status: SubscriptionStatus) -> bool {
        self.blocking.contains(&status)
    }

    pub fn blocking_statuses(&self) -> impl Iterator<Item = &SubscriptionStatus> {
        self.blocking.iter()
    }
}
