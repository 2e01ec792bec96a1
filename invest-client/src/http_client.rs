use crate::InvestClientTrait;
use crate::error::InvestClientError;
use crate::models::{Account, AccountStock, CreatedUser, User, UserPatch};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct InvestClientHttp {
    client: Arc<Client>,
    base_url: String,
}

impl InvestClientHttp {
    pub async fn connect(endpoint: &str) -> Result<Self, InvestClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    async fn expect_success(resp: Response) -> Result<Response, InvestClientError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(InvestClientError::from_http_response(resp).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, InvestClientError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let resp = Self::expect_success(resp).await?;
        Ok(resp.json().await?)
    }
}

#[async_trait(?Send)]
impl InvestClientTrait for InvestClientHttp {
    async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<Uuid, InvestClientError> {
        let resp = self
            .client
            .post(self.url("/users"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let created: CreatedUser = Self::expect_success(resp).await?.json().await?;
        debug!(user_id = %created.user_id, "user created");
        Ok(created.user_id)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, InvestClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/users/{}", id)))
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let user = Self::expect_success(resp).await?.json().await?;
        Ok(Some(user))
    }

    async fn list_users(&self) -> Result<Vec<User>, InvestClientError> {
        self.get_json("/users").await
    }

    async fn update_user(
        &self,
        id: &str,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<(), InvestClientError> {
        let patch = UserPatch {
            username: username.as_deref(),
            password: password.as_deref(),
        };
        let resp = self
            .client
            .put(self.url(&format!("/users/{}", id)))
            .json(&patch)
            .send()
            .await?;

        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), InvestClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/users/{}", id)))
            .send()
            .await?;

        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn create_account(
        &self,
        user_id: &str,
        description: String,
        street: String,
        number: i32,
    ) -> Result<(), InvestClientError> {
        let resp = self
            .client
            .post(self.url(&format!("/users/{}/accounts", user_id)))
            .json(&serde_json::json!({
                "description": description,
                "street": street,
                "number": number,
            }))
            .send()
            .await?;

        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>, InvestClientError> {
        self.get_json(&format!("/users/{}/accounts", user_id)).await
    }

    async fn create_stock(
        &self,
        stock_id: String,
        description: String,
    ) -> Result<(), InvestClientError> {
        let resp = self
            .client
            .post(self.url("/stocks"))
            .json(&serde_json::json!({
                "stock_id": stock_id,
                "description": description,
            }))
            .send()
            .await?;

        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn associate_stock(
        &self,
        account_id: &str,
        stock_id: String,
        quantity: i32,
    ) -> Result<(), InvestClientError> {
        let resp = self
            .client
            .post(self.url(&format!("/accounts/{}/stocks", account_id)))
            .json(&serde_json::json!({
                "stock_id": stock_id,
                "quantity": quantity,
            }))
            .send()
            .await?;

        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn list_account_stocks(
        &self,
        account_id: &str,
    ) -> Result<Vec<AccountStock>, InvestClientError> {
        self.get_json(&format!("/accounts/{}/stocks", account_id))
            .await
    }
}
