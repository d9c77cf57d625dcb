// property-backend/src/domain/tenancy_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 物件とテナントの紐付け。家賃条件は rent_terms 側に追記される
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenancies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub seq: i64,

    pub property_id: Uuid,

    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property_model::Entity",
        from = "Column::PropertyId",
        to = "super::property_model::Column::Id",
        on_delete = "Cascade"
    )]
    Property,

    #[sea_orm(
        belongs_to = "super::tenant_model::Entity",
        from = "Column::TenantId",
        to = "super::tenant_model::Column::Id",
        on_delete = "Cascade"
    )]
    Tenant,

    #[sea_orm(has_many = "super::rent_term_model::Entity")]
    RentTerms,
}

impl Related<super::property_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::tenant_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl Related<super::rent_term_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentTerms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// テナンシーと、その物件を所有する大家のID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenancyLink {
    pub tenancy_id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub created_at: DateTime<Utc>,
}
