// property-backend/src/service/property_service.rs

use crate::domain::account_role::AccountRole;
use crate::domain::property_model::{self, PropertyStatus};
use crate::domain::tenancy_model::TenancyLink;
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::AccountStore;
use crate::repository::property_repository::PropertyStore;
use crate::utils::error_helper::not_found_error;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 物件とテナンシーの管理。大家IDは常に認可コンテキストから渡される
#[derive(Clone)]
pub struct PropertyService {
    properties: Arc<dyn PropertyStore>,
    accounts: Arc<dyn AccountStore>,
}

impl PropertyService {
    pub fn new(properties: Arc<dyn PropertyStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self {
            properties,
            accounts,
        }
    }

    pub async fn create_property(
        &self,
        landlord_id: Uuid,
        address: &str,
    ) -> AppResult<property_model::Model> {
        let property = self
            .properties
            .create_property(landlord_id, address.trim().to_string())
            .await?;

        info!(landlord_id = %landlord_id, property_id = %property.id, "Property created");
        Ok(property)
    }

    pub async fn list_properties(&self, landlord_id: Uuid) -> AppResult<Vec<property_model::Model>> {
        self.properties.list_properties(landlord_id).await
    }

    /// メールアドレスで指定したテナントを物件に紐付ける
    pub async fn create_tenancy(
        &self,
        landlord_id: Uuid,
        property_id: Uuid,
        tenant_email: &str,
    ) -> AppResult<TenancyLink> {
        let property = match self.properties.find_property(property_id).await? {
            Some(property) if property.landlord_id == landlord_id => property,
            _ => {
                return Err(not_found_error(
                    "Property",
                    &property_id.to_string(),
                    "property_service::create_tenancy",
                ))
            }
        };

        if property.status == PropertyStatus::Occupied.as_str() {
            return Err(AppError::Conflict("Property is already occupied".to_string()));
        }

        let tenant = self
            .accounts
            .find_by_email(tenant_email)
            .await?
            .ok_or_else(|| AppError::NotFound("Tenant account not found".to_string()))?;

        let tenant_id = match (tenant.role, tenant.tenant_id) {
            (AccountRole::Tenant, Some(tenant_id)) => tenant_id,
            _ => {
                return Err(AppError::BadRequest(
                    "The account is not a tenant".to_string(),
                ))
            }
        };

        let link = self.properties.create_tenancy(property_id, tenant_id).await?;

        info!(
            landlord_id = %landlord_id,
            property_id = %property_id,
            tenancy_id = %link.tenancy_id,
            "Tenancy created"
        );

        Ok(link)
    }
}
