use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub account_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub street: String,
    pub number: i32,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(user_id: Uuid, description: String, street: String, number: i32) -> Self {
        Self {
            account_id: Uuid::new_v4(),
            user_id,
            description,
            street,
            number,
            created_at: Utc::now(),
        }
    }
}

/// Position of a stock inside an account, keyed by `(account_id, stock_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccountStock {
    pub account_id: Uuid,
    pub stock_id: String,
    pub quantity: i32,
}
