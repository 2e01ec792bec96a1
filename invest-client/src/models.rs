use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} <{}> created {}",
            self.user_id,
            self.username,
            self.email,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountStock {
    pub stock_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedUser {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}
