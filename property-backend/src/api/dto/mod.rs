// property-backend/src/api/dto/mod.rs
pub mod admin_dto;
pub mod auth_dto;
pub mod property_dto;
pub mod rent_dto;
pub mod subscription_dto;
