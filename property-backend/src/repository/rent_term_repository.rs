// property-backend/src/repository/rent_term_repository.rs

use crate::domain::rent_term_model::{self, Entity as RentTermEntity, NewRentTerm};
use crate::error::AppResult;
use async_trait::async_trait;
use sea_orm::entity::*;
use sea_orm::{DbConn, QueryFilter, QueryOrder};
use uuid::Uuid;

#[async_trait]
pub trait RentTermStore: Send + Sync {
    /// テナンシーの作成順序が最新の家賃条件
    async fn latest_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> AppResult<Option<rent_term_model::Model>>;

    /// 家賃条件を追記する。更新・削除は行わない
    async fn append(&self, term: NewRentTerm) -> AppResult<rent_term_model::Model>;

    async fn history_for_tenancy(&self, tenancy_id: Uuid)
        -> AppResult<Vec<rent_term_model::Model>>;
}

#[derive(Debug, Clone)]
pub struct RentTermRepository {
    db: DbConn,
}

impl RentTermRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RentTermStore for RentTermRepository {
    async fn latest_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> AppResult<Option<rent_term_model::Model>> {
        let latest = RentTermEntity::find()
            .filter(rent_term_model::Column::TenancyId.eq(tenancy_id))
            .order_by_desc(rent_term_model::Column::Seq)
            .one(&self.db)
            .await?;
        Ok(latest)
    }

    async fn append(&self, term: NewRentTerm) -> AppResult<rent_term_model::Model> {
        let model = term.into_active_model().insert(&self.db).await?;
        Ok(model)
    }

    async fn history_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> AppResult<Vec<rent_term_model::Model>> {
        let history = RentTermEntity::find()
            .filter(rent_term_model::Column::TenancyId.eq(tenancy_id))
            .order_by_desc(rent_term_model::Column::Seq)
            .all(&self.db)
            .await?;
        Ok(history)
    }
}
