// property-backend/src/service/mod.rs
pub mod account_resolver;
pub mod admin_approval;
pub mod auth_service;
pub mod authorization;
pub mod property_service;
pub mod rent_ledger;
pub mod subscription_gate;
pub mod subscription_service;
