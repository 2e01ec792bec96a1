use std::sync::Arc;

use anyhow::Context;
use invest_server::application::account_service::AccountService;
use invest_server::application::stock_service::StockService;
use invest_server::application::user_service::UserService;
use invest_server::data::account_repository::PostgresAccountRepository;
use invest_server::data::stock_repository::PostgresStockRepository;
use invest_server::data::user_repository::PostgresUserRepository;
use invest_server::infrastructure::config::AppConfig;
use invest_server::infrastructure::database::{create_pool, run_migrations};
use invest_server::infrastructure::logging::init_logging;
use invest_server::server::{AppServices, start_rest_server};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let account_repo = Arc::new(PostgresAccountRepository::new(pool.clone()));
    let stock_repo = Arc::new(PostgresStockRepository::new(pool.clone()));

    let services = AppServices {
        users: UserService::new(Arc::clone(&user_repo)),
        accounts: AccountService::new(
            Arc::clone(&user_repo),
            Arc::clone(&account_repo),
            Arc::clone(&stock_repo),
        ),
        stocks: StockService::new(Arc::clone(&stock_repo)),
    };

    start_rest_server(config, services).await
}
