// property-backend/src/api/dto/admin_dto.rs

use super::auth_dto::AccountResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 管理者登録リクエスト。承認されるまで管理者権限は持たない
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminRegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminApprovalResponse {
    pub account: AccountResponse,
}
