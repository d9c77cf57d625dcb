// property-backend/src/domain/property_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub landlord_id: Uuid,

    pub address: String,

    pub status: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
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

    #[sea_orm(has_many = "super::tenancy_model::Entity")]
    Tenancies,
}

impl Related<super::landlord_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Landlord.def()
    }
}

impl Related<super::tenancy_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenancies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 物件の入居状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Vacant,
    Occupied,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vacant => "vacant",
            Self::Occupied => "occupied",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vacant" => Ok(Self::Vacant),
            "occupied" => Ok(Self::Occupied),
            _ => Err(format!("Invalid property status: {}", s)),
        }
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
