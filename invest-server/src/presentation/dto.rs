use crate::domain::account::{Account, AccountStock};
use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ======================= USERS =======================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ======================= ACCOUNTS =======================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub description: String,
    pub street: String,
    pub number: i32,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account_id: Uuid,
    pub description: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            description: account.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociateStockRequest {
    pub stock_id: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct AccountStockResponse {
    pub stock_id: String,
    pub quantity: i32,
}

impl From<AccountStock> for AccountStockResponse {
    fn from(position: AccountStock) -> Self {
        Self {
            stock_id: position.stock_id,
            quantity: position.quantity,
        }
    }
}

// ======================= STOCKS =======================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStockRequest {
    pub stock_id: String,
    pub description: String,
}
