use crate::data::database_error;
use crate::domain::error::DomainError;
use crate::domain::stock::Stock;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn save(&self, stock: Stock) -> Result<Stock, DomainError>;
    async fn find_by_id(&self, stock_id: String) -> Result<Option<Stock>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresStockRepository {
    pool: PgPool,
}

impl PostgresStockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockRepository for PostgresStockRepository {
    async fn save(&self, stock: Stock) -> Result<Stock, DomainError> {
        let saved = sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stocks (stock_id, description)
            VALUES ($1, $2)
            ON CONFLICT (stock_id) DO UPDATE
            SET description = EXCLUDED.description
            RETURNING stock_id, description
            "#,
        )
        .bind(&stock.stock_id)
        .bind(&stock.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to save stock {}: {}", stock.stock_id, e);
            database_error(e)
        })?;

        info!(stock_id = %saved.stock_id, "stock saved");
        Ok(saved)
    }

    async fn find_by_id(&self, stock_id: String) -> Result<Option<Stock>, DomainError> {
        sqlx::query_as::<_, Stock>("SELECT stock_id, description FROM stocks WHERE stock_id = $1")
            .bind(&stock_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("db error find_by_id {}: {}", stock_id, e);
                database_error(e)
            })
    }
}
