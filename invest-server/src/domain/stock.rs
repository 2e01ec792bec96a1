use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A listed stock, identified by its ticker (e.g. `PETR4`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub stock_id: String,
    pub description: String,
}

impl Stock {
    pub fn new(stock_id: &str, description: String) -> Self {
        Self {
            stock_id: stock_id.trim().to_string(),
            description,
        }
    }
}
