// property-backend/src/domain/tenant_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub account_id: Uuid,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_model::Entity",
        from = "Column::AccountId",
        to = "super::account_model::Column::Id",
        on_delete = "Cascade"
    )]
    Account,

    #[sea_orm(has_many = "super::tenancy_model::Entity")]
    Tenancies,
}

impl Related<super::account_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::tenancy_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenancies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
