// property-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使うエラー生成パターン。

use crate::error::AppError;
use tracing::{error, warn};
use validator::ValidationErrors;

/// validatorのValidationErrorsをAppErrorに変換する統一処理
pub fn convert_validation_errors(validation_errors: ValidationErrors, context: &str) -> AppError {
    warn!(
        context = %context,
        error_count = validation_errors.field_errors().len(),
        "Validation failed"
    );

    let errors: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| "Invalid value".to_string(), |cow| cow.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();

    AppError::ValidationErrors(errors)
}

/// 内部サーバーエラーをログ付きで生成
pub fn internal_server_error<E: std::fmt::Display>(
    error: E,
    context: &str,
    user_message: &str,
) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Internal server error occurred"
    );
    AppError::InternalServerError(user_message.to_string())
}

/// 禁止エラーをログ付きで生成
pub fn forbidden_error(message: &str, context: &str, account_id: Option<&str>) -> AppError {
    warn!(
        context = %context,
        message = %message,
        account_id = account_id.unwrap_or("unknown"),
        "Forbidden access attempt"
    );
    AppError::Forbidden(message.to_string())
}

/// リソース未発見エラーをログ付きで生成
pub fn not_found_error(resource: &str, identifier: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        resource = %resource,
        identifier = %identifier,
        "Resource not found"
    );
    AppError::NotFound(format!(
        "{} with identifier {} not found",
        resource, identifier
    ))
}
