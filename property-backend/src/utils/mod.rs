// property-backend/src/utils/mod.rs

pub mod approval_token;
pub mod credential;
pub mod error_helper;
pub mod password;
