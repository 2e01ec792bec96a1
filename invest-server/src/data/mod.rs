use crate::domain::error::DomainError;

pub mod account_repository;
pub mod stock_repository;
pub mod user_repository;

/// Every store failure surfaces as `Internal` with the same message prefix.
pub(crate) fn database_error(e: sqlx::Error) -> DomainError {
    DomainError::Internal(format!("database error: {}", e))
}
