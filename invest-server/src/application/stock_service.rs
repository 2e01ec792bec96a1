use std::sync::Arc;

use tracing::instrument;

use crate::data::stock_repository::StockRepository;
use crate::domain::{error::DomainError, stock::Stock};
use crate::presentation::dto::CreateStockRequest;

pub struct StockService<R: StockRepository + 'static> {
    repo: Arc<R>,
}

impl<R: StockRepository + 'static> Clone for StockService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> StockService<R>
where
    R: StockRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Registers a ticker. Re-registering an existing ticker replaces its description.
    #[instrument(skip(self))]
    pub async fn create_stock(&self, input: CreateStockRequest) -> Result<Stock, DomainError> {
        let stock = Stock::new(&input.stock_id, input.description);
        if stock.stock_id.is_empty() {
            return Err(DomainError::Validation("stock_id must not be empty".into()));
        }
        self.repo.save(stock).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stock_repository::MockStockRepository;

    #[tokio::test]
    async fn create_stock_trims_ticker() {
        let mut repo = MockStockRepository::new();
        repo.expect_save()
            .withf(|s| s.stock_id == "ITUB4" && s.description == "Itau")
            .once()
            .returning(Ok);

        let stock = StockService::new(Arc::new(repo))
            .create_stock(CreateStockRequest {
                stock_id: "  ITUB4 ".into(),
                description: "Itau".into(),
            })
            .await
            .unwrap();

        assert_eq!(stock.stock_id, "ITUB4");
    }

    #[tokio::test]
    async fn create_stock_rejects_blank_ticker() {
        let mut repo = MockStockRepository::new();
        repo.expect_save().never();

        let err = StockService::new(Arc::new(repo))
            .create_stock(CreateStockRequest {
                stock_id: "   ".into(),
                description: "nothing".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }
}
