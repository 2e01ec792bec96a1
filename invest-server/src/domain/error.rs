use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user not found: {0}")]
    UserNotFound(Uuid),
    #[error("account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("stock not found: {0}")]
    StockNotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::InvalidId(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::UserNotFound(_)
            | DomainError::AccountNotFound(_)
            | DomainError::StockNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // store failures are logged where they happen, the client only sees a generic message
        let message = match self {
            DomainError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        let details = match self {
            DomainError::UserNotFound(resource) | DomainError::AccountNotFound(resource) => {
                Some(json!({ "resource": resource }))
            }
            DomainError::StockNotFound(stock_id) => Some(json!({ "resource": stock_id })),
            DomainError::InvalidId(raw) => Some(json!({ "value": raw })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
