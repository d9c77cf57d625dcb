// property-backend/src/repository/property_repository.rs

use super::transaction_error;
use crate::domain::property_model::{self, Entity as PropertyEntity, PropertyStatus};
use crate::domain::tenancy_model::{self, Entity as TenancyEntity, TenancyLink};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::*;
use sea_orm::{DbConn, NotSet, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait};
use uuid::Uuid;

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn create_property(
        &self,
        landlord_id: Uuid,
        address: String,
    ) -> AppResult<property_model::Model>;

    async fn list_properties(&self, landlord_id: Uuid) -> AppResult<Vec<property_model::Model>>;

    async fn find_property(&self, property_id: Uuid) -> AppResult<Option<property_model::Model>>;

    /// テナンシーを作成し、物件を入居中にする
    async fn create_tenancy(&self, property_id: Uuid, tenant_id: Uuid) -> AppResult<TenancyLink>;

    async fn find_tenancy(&self, tenancy_id: Uuid) -> AppResult<Option<TenancyLink>>;

    /// テナントの最新テナンシー（物件の所有者を含む）
    async fn latest_tenancy_for_tenant(&self, tenant_id: Uuid) -> AppResult<Option<TenancyLink>>;
}

#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DbConn,
}

impl PropertyRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn to_link(
        tenancy: tenancy_model::Model,
        property: Option<property_model::Model>,
    ) -> AppResult<TenancyLink> {
        let property = property.ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Tenancy {} references a missing property",
                tenancy.id
            ))
        })?;

        Ok(TenancyLink {
            tenancy_id: tenancy.id,
            property_id: tenancy.property_id,
            tenant_id: tenancy.tenant_id,
            landlord_id: property.landlord_id,
            created_at: tenancy.created_at,
        })
    }
}

#[async_trait]
impl PropertyStore for PropertyRepository {
    async fn create_property(
        &self,
        landlord_id: Uuid,
        address: String,
    ) -> AppResult<property_model::Model> {
        let now = Utc::now();
        let model = property_model::ActiveModel {
            id: Set(Uuid::new_v4()),
            landlord_id: Set(landlord_id),
            address: Set(address),
            status: Set(PropertyStatus::Vacant.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(model)
    }

    async fn list_properties(&self, landlord_id: Uuid) -> AppResult<Vec<property_model::Model>> {
        let properties = PropertyEntity::find()
            .filter(property_model::Column::LandlordId.eq(landlord_id))
            .order_by_asc(property_model::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(properties)
    }

    async fn find_property(&self, property_id: Uuid) -> AppResult<Option<property_model::Model>> {
        Ok(PropertyEntity::find_by_id(property_id).one(&self.db).await?)
    }

    async fn create_tenancy(&self, property_id: Uuid, tenant_id: Uuid) -> AppResult<TenancyLink> {
        self.db
            .transaction::<_, TenancyLink, AppError>(|txn| {
                Box::pin(async move {
                    // 同時に同じ物件へ紐付けられないよう行ロックを取る
                    let property = PropertyEntity::find_by_id(property_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

                    if property.status == PropertyStatus::Occupied.as_str() {
                        return Err(AppError::Conflict("Property is already occupied".to_string()));
                    }

                    let now = Utc::now();
                    let tenancy = tenancy_model::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        seq: NotSet,
                        property_id: Set(property_id),
                        tenant_id: Set(tenant_id),
                        created_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    let landlord_id = property.landlord_id;
                    let mut active: property_model::ActiveModel = property.into();
                    active.status = Set(PropertyStatus::Occupied.as_str().to_string());
                    active.updated_at = Set(now);
                    active.update(txn).await?;

                    Ok(TenancyLink {
                        tenancy_id: tenancy.id,
                        property_id,
                        tenant_id,
                        landlord_id,
                        created_at: tenancy.created_at,
                    })
                })
            })
            .await
            .map_err(transaction_error)
    }

    async fn find_tenancy(&self, tenancy_id: Uuid) -> AppResult<Option<TenancyLink>> {
        let found = TenancyEntity::find_by_id(tenancy_id)
            .find_also_related(PropertyEntity)
            .one(&self.db)
            .await?;

        found
            .map(|(tenancy, property)| Self::to_link(tenancy, property))
            .transpose()
    }

    async fn latest_tenancy_for_tenant(&self, tenant_id: Uuid) -> AppResult<Option<TenancyLink>> {
        let found = TenancyEntity::find()
            .filter(tenancy_model::Column::TenantId.eq(tenant_id))
            .order_by_desc(tenancy_model::Column::Seq)
            .find_also_related(PropertyEntity)
            .one(&self.db)
            .await?;

        found
            .map(|(tenancy, property)| Self::to_link(tenancy, property))
            .transpose()
    }
}
