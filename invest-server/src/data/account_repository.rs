use crate::data::database_error;
use crate::domain::account::{Account, AccountStock};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn save(&self, account: Account) -> Result<Account, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Account>, DomainError>;
    /// Upserts on `(account_id, stock_id)`; the stored quantity is replaced.
    async fn save_stock(&self, position: AccountStock) -> Result<AccountStock, DomainError>;
    async fn find_stocks(&self, account_id: Uuid) -> Result<Vec<AccountStock>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (account_id, user_id, description, street, number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.account_id)
        .bind(account.user_id)
        .bind(&account.description)
        .bind(&account.street)
        .bind(account.number)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create account: {}", e);
            database_error(e)
        })?;

        info!(account_id = %account.account_id, user_id = %account.user_id, "account created");
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, user_id, description, street, number, created_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            database_error(e)
        })
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Account>, DomainError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, user_id, description, street, number, created_at
            FROM accounts
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching accounts of {}: {}", user_id, e);
            database_error(e)
        })
    }

    async fn save_stock(&self, position: AccountStock) -> Result<AccountStock, DomainError> {
        let saved = sqlx::query_as::<_, AccountStock>(
            r#"
            INSERT INTO accounts_stocks (account_id, stock_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id, stock_id) DO UPDATE
            SET quantity = EXCLUDED.quantity
            RETURNING account_id, stock_id, quantity
            "#,
        )
        .bind(position.account_id)
        .bind(&position.stock_id)
        .bind(position.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "failed to associate stock {} with account {}: {}",
                position.stock_id, position.account_id, e
            );
            database_error(e)
        })?;

        info!(
            account_id = %saved.account_id,
            stock_id = %saved.stock_id,
            quantity = saved.quantity,
            "stock associated"
        );
        Ok(saved)
    }

    async fn find_stocks(&self, account_id: Uuid) -> Result<Vec<AccountStock>, DomainError> {
        sqlx::query_as::<_, AccountStock>(
            r#"
            SELECT account_id, stock_id, quantity
            FROM accounts_stocks
            WHERE account_id = $1
            ORDER BY stock_id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching stocks of {}: {}", account_id, e);
            database_error(e)
        })
    }
}
