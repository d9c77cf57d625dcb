// property-backend/src/domain/mod.rs
pub mod account_model;
pub mod account_role;
pub mod landlord_model;
pub mod property_model;
pub mod rent_term_model;
pub mod subscription_model;
pub mod subscription_status;
pub mod tenancy_model;
pub mod tenant_model;
