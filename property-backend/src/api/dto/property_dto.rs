// property-backend/src/api/dto/property_dto.rs

use crate::domain::property_model;
use crate::domain::tenancy_model::TenancyLink;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 500, message = "Address must be between 1 and 500 characters"))]
    pub address: String,
}

/// テナントをメールアドレスで指定して物件に紐付ける
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTenancyRequest {
    #[validate(email(message = "Invalid email format"))]
    pub tenant_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResponse {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<property_model::Model> for PropertyResponse {
    fn from(model: property_model::Model) -> Self {
        Self {
            id: model.id,
            landlord_id: model.landlord_id,
            address: model.address,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyResponse {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TenancyLink> for TenancyResponse {
    fn from(link: TenancyLink) -> Self {
        Self {
            id: link.tenancy_id,
            property_id: link.property_id,
            tenant_id: link.tenant_id,
            created_at: link.created_at,
        }
    }
}
