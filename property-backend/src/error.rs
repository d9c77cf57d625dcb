// property-backend/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    /// 資格情報が無い・不正・期限切れ、またはアカウントが存在しない
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// ロール不一致
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// サブスクリプションゲートで拒否された
    #[error("Subscription required: {0}")]
    SubscriptionRequired(String),

    /// 承認トークンに一致する承認待ちアカウントが無い
    #[error("Invalid or already used approval token")]
    InvalidToken,

    #[error("Item not found: {0}")]
    NotFound(String),

    /// ストアに到達できなかった。NotFound には絶対に変換しない
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Multiple validation errors")]
    ValidationErrors(Vec<String>),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// レスポンスの `error_type` として返す識別子
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::SubscriptionRequired(_) => "subscription_required",
            AppError::InvalidToken => "invalid_token",
            AppError::NotFound(_) => "not_found",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::ValidationError(_) => "validation_error",
            AppError::ValidationErrors(_) | AppError::ValidationFailure(_) => "validation_errors",
            AppError::BadRequest(_) => "bad_request",
            AppError::Conflict(_) => "conflict",
            AppError::InternalServerError(_) => "internal_server_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::SubscriptionRequired(_) => StatusCode::FORBIDDEN,
            AppError::InvalidToken | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ValidationError(_)
            | AppError::ValidationErrors(_)
            | AppError::ValidationFailure(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type().to_string();

        let error_response = match self {
            AppError::StoreUnavailable(db_err) => {
                // サーバーログには詳細を出し、クライアントには出さない
                error!(error = %db_err, "Store unavailable");
                ErrorResponse::new(
                    "The service is temporarily unavailable".to_string(),
                    error_type,
                )
            }
            AppError::InternalServerError(message) => {
                error!(error = %message, "Internal server error");
                ErrorResponse::new("An internal server error occurred".to_string(), error_type)
            }
            AppError::InvalidToken => {
                ErrorResponse::new("Invalid or already used approval token".to_string(), error_type)
            }
            AppError::ValidationErrors(errors) => {
                let mut field_errors = HashMap::new();
                for error in &errors {
                    if let Some((field, message)) = error.split_once(": ") {
                        field_errors
                            .entry(field.to_string())
                            .or_insert_with(Vec::new)
                            .push(message.to_string());
                    }
                }
                ErrorResponse {
                    validation_errors: Some(field_errors),
                    ..ErrorResponse::new("Validation failed".to_string(), error_type)
                }
            }
            AppError::ValidationFailure(errors) => {
                let field_errors: HashMap<String, Vec<String>> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errors)| {
                        let messages = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map_or_else(|| "Invalid value".to_string(), |m| m.to_string())
                            })
                            .collect();
                        (field.to_string(), messages)
                    })
                    .collect();
                ErrorResponse {
                    validation_errors: Some(field_errors),
                    ..ErrorResponse::new("Validation failed".to_string(), error_type)
                }
            }
            AppError::Unauthenticated(message) => {
                warn!(reason = %message, "Unauthenticated request");
                ErrorResponse::new("Authentication required".to_string(), error_type)
            }
            AppError::Forbidden(message)
            | AppError::SubscriptionRequired(message)
            | AppError::NotFound(message)
            | AppError::ValidationError(message)
            | AppError::BadRequest(message)
            | AppError::Conflict(message) => ErrorResponse::new(message, error_type),
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: String, error_type: String) -> Self {
        Self {
            success: false,
            error: message.clone(),
            message,
            validation_errors: None,
            error_type,
        }
    }
}
