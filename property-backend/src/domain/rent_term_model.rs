// property-backend/src/domain/rent_term_model.rs

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// 家賃条件の履歴行。挿入のみで、既存行は不変
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rent_terms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// ストアが採番する作成順序
    pub seq: i64,

    pub tenancy_id: Uuid,

    pub amount: i64,

    pub due_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenancy_model::Entity",
        from = "Column::TenancyId",
        to = "super::tenancy_model::Column::Id",
        on_delete = "Cascade"
    )]
    Tenancy,
}

impl Related<super::tenancy_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenancy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 追記する家賃条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRentTerm {
    pub tenancy_id: Uuid,
    pub amount: i64,
    pub due_date: NaiveDate,
}

impl NewRentTerm {
    /// 挿入用のActiveModel。seq はDBのシーケンスに任せる
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            seq: NotSet,
            tenancy_id: Set(self.tenancy_id),
            amount: Set(self.amount),
            due_date: Set(self.due_date),
            created_at: Set(Utc::now()),
        }
    }
}

/// テナントの現在の家賃
///
/// テナンシーが無いテナントは `NoRent` であり、エラーではない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CurrentRent {
    NoRent,
    Due {
        tenancy_id: Uuid,
        amount: i64,
        due_date: NaiveDate,
        recorded_at: DateTime<Utc>,
    },
}

impl CurrentRent {
    pub fn is_no_rent(&self) -> bool {
        matches!(self, CurrentRent::NoRent)
    }

    /// (金額, 期日) の組。NoRent の場合は None
    pub fn amount_and_due_date(&self) -> Option<(i64, NaiveDate)> {
        match self {
            CurrentRent::NoRent => None,
            CurrentRent::Due {
                amount, due_date, ..
            } => Some((*amount, *due_date)),
        }
    }
}

impl From<Option<Model>> for CurrentRent {
    fn from(latest: Option<Model>) -> Self {
        match latest {
            Some(term) => CurrentRent::Due {
                tenancy_id: term.tenancy_id,
                amount: term.amount,
                due_date: term.due_date,
                recorded_at: term.created_at,
            },
            None => CurrentRent::NoRent,
        }
    }
}
