use async_trait::async_trait;
use uuid::Uuid;

mod error;
mod http_client;
mod models;

pub use error::InvestClientError;
pub use http_client::InvestClientHttp;
pub use models::{Account, AccountStock, User};

#[async_trait(?Send)]
pub trait InvestClientTrait {
    async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<Uuid, InvestClientError>;
    /// `Ok(None)` when the server has no such user.
    async fn get_user(&self, id: &str) -> Result<Option<User>, InvestClientError>;
    async fn list_users(&self) -> Result<Vec<User>, InvestClientError>;
    async fn update_user(
        &self,
        id: &str,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<(), InvestClientError>;
    async fn delete_user(&self, id: &str) -> Result<(), InvestClientError>;
    async fn create_account(
        &self,
        user_id: &str,
        description: String,
        street: String,
        number: i32,
    ) -> Result<(), InvestClientError>;
    async fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>, InvestClientError>;
    async fn create_stock(
        &self,
        stock_id: String,
        description: String,
    ) -> Result<(), InvestClientError>;
    async fn associate_stock(
        &self,
        account_id: &str,
        stock_id: String,
        quantity: i32,
    ) -> Result<(), InvestClientError>;
    async fn list_account_stocks(
        &self,
        account_id: &str,
    ) -> Result<Vec<AccountStock>, InvestClientError>;
}
