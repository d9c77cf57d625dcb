// property-backend/src/service/rent_ledger.rs

use crate::domain::rent_term_model::{self, CurrentRent, NewRentTerm};
use crate::domain::tenancy_model::TenancyLink;
use crate::error::{AppError, AppResult};
use crate::repository::property_repository::PropertyStore;
use crate::repository::rent_term_repository::RentTermStore;
use crate::utils::error_helper::not_found_error;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 家賃台帳
///
/// 家賃条件は追記のみ。作成順序が最新の行が現在の家賃となる。
#[derive(Clone)]
pub struct RentLedger {
    rent_terms: Arc<dyn RentTermStore>,
    properties: Arc<dyn PropertyStore>,
}

impl RentLedger {
    pub fn new(rent_terms: Arc<dyn RentTermStore>, properties: Arc<dyn PropertyStore>) -> Self {
        Self {
            rent_terms,
            properties,
        }
    }

    /// テナントの現在の家賃
    ///
    /// 最新テナンシーの家賃条件のうち作成順序が最新のもの。認可パイプラインが
    /// ゲート判定に使うテナンシーと同じ選び方をする。
    pub async fn current_rent(&self, tenant_id: Uuid) -> AppResult<CurrentRent> {
        let tenancy_id = self
            .properties
            .latest_tenancy_for_tenant(tenant_id)
            .await?
            .map(|link| link.tenancy_id);
        self.current_rent_in(tenancy_id).await
    }

    /// 指定テナンシーの現在の家賃。テナンシーも家賃条件も無ければ `CurrentRent::NoRent`
    pub async fn current_rent_in(&self, tenancy_id: Option<Uuid>) -> AppResult<CurrentRent> {
        let Some(tenancy_id) = tenancy_id else {
            return Ok(CurrentRent::NoRent);
        };
        let latest = self.rent_terms.latest_for_tenancy(tenancy_id).await?;
        Ok(CurrentRent::from(latest))
    }

    pub async fn append_rent_term(
        &self,
        tenancy_id: Uuid,
        amount: i64,
        due_date: NaiveDate,
    ) -> AppResult<rent_term_model::Model> {
        if amount <= 0 {
            return Err(AppError::ValidationError(
                "amount: Rent amount must be greater than zero".to_string(),
            ));
        }

        self.properties
            .find_tenancy(tenancy_id)
            .await?
            .ok_or_else(|| {
                not_found_error("Tenancy", &tenancy_id.to_string(), "rent_ledger::append")
            })?;

        let term = self
            .rent_terms
            .append(NewRentTerm {
                tenancy_id,
                amount,
                due_date,
            })
            .await?;

        info!(
            tenancy_id = %tenancy_id,
            rent_term_id = %term.id,
            amount = amount,
            due_date = %due_date,
            "Rent term appended"
        );

        Ok(term)
    }

    /// テナンシーの家賃条件履歴（新しい順）
    pub async fn rent_history(&self, tenancy_id: Uuid) -> AppResult<Vec<rent_term_model::Model>> {
        self.rent_terms.history_for_tenancy(tenancy_id).await
    }

    /// 大家が所有するテナンシーを取得する。他の大家のものは存在しないものとして扱う
    pub async fn tenancy_for_landlord(
        &self,
        landlord_id: Uuid,
        tenancy_id: Uuid,
    ) -> AppResult<TenancyLink> {
        match self.properties.find_tenancy(tenancy_id).await? {
            Some(link) if link.landlord_id == landlord_id => Ok(link),
            _ => Err(not_found_error(
                "Tenancy",
                &tenancy_id.to_string(),
                "rent_ledger::tenancy_for_landlord",
            )),
        }
    }
}
