// property-backend/src/repository/mod.rs
pub mod account_repository;
pub mod property_repository;
pub mod rent_term_repository;
pub mod subscription_repository;

use crate::error::AppError;
use sea_orm::TransactionError;

/// トランザクションのエラーを AppError に戻す
pub(crate) fn transaction_error(err: TransactionError<AppError>) -> AppError {
    match err {
        TransactionError::Connection(db_err) => AppError::StoreUnavailable(db_err),
        TransactionError::Transaction(app_err) => app_err,
    }
}
