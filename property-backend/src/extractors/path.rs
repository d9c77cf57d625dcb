// property-backend/src/extractors/path.rs

use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// 値の直前のセグメントからパラメータ名を推測する
fn param_name_for(path: &str, raw: &str) -> &'static str {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    segments
        .windows(2)
        .find(|pair| pair[1] == raw)
        .map_or("id", |pair| match pair[0] {
            "properties" => "property_id",
            "tenancies" => "tenancy_id",
            "landlords" => "landlord_id",
            _ => "id",
        })
}

/// パスパラメータのUUIDを検証して取り出す
///
/// 不正な値は `AppError::BadRequest` として統一エラー形式で返す。
#[derive(Debug, Clone, Copy)]
pub struct ValidatedUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidatedUuid
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Missing path parameter: {}", e)))?;

        let uuid = Uuid::parse_str(&raw).map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid UUID format for '{}': '{}'",
                param_name_for(parts.uri.path(), &raw),
                raw
            ))
        })?;

        Ok(ValidatedUuid(uuid))
    }
}
