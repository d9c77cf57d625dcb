// property-backend/src/api/dto/rent_dto.rs

use crate::domain::rent_term_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 家賃条件の追記リクエスト。金額は最小通貨単位の整数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendRentTermRequest {
    pub amount: i64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentTermResponse {
    pub id: Uuid,
    pub tenancy_id: Uuid,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<rent_term_model::Model> for RentTermResponse {
    fn from(model: rent_term_model::Model) -> Self {
        Self {
            id: model.id,
            tenancy_id: model.tenancy_id,
            amount: model.amount,
            due_date: model.due_date,
            created_at: model.created_at,
        }
    }
}
