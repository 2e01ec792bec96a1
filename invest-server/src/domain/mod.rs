pub mod account;
pub mod error;
pub mod stock;
pub mod user;

use uuid::Uuid;

use self::error::DomainError;

/// Parses a path identifier. Callers must do this before touching any store.
pub fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::InvalidId(raw.to_string()))
}
