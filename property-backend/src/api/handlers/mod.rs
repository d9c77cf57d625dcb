// property-backend/src/api/handlers/mod.rs
pub mod admin_handler;
pub mod auth_handler;
pub mod property_handler;
pub mod rent_handler;
pub mod subscription_handler;
pub mod system_handler;
