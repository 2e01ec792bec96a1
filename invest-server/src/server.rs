use crate::application::account_service::AccountService;
use crate::application::stock_service::StockService;
use crate::application::user_service::UserService;
use crate::data::account_repository::AccountRepository;
use crate::data::stock_repository::StockRepository;
use crate::data::user_repository::UserRepository;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Services shared by every worker.
pub struct AppServices<U, A, S>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    pub users: UserService<U>,
    pub accounts: AccountService<U, A, S>,
    pub stocks: StockService<S>,
}

impl<U, A, S> Clone for AppServices<U, A, S>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            accounts: self.accounts.clone(),
            stocks: self.stocks.clone(),
        }
    }
}

/// Registers the service data and every `/v1` route.
pub fn configure<U, A, S>(services: AppServices<U, A, S>) -> impl FnOnce(&mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(services.users))
            .app_data(web::Data::new(services.accounts))
            .app_data(web::Data::new(services.stocks))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/v1")
                    .service(handlers::account::user_accounts::<U, A, S>())
                    .service(handlers::user::scope::<U>())
                    .service(handlers::account::scope::<U, A, S>())
                    .service(handlers::stock::scope::<S>()),
            );
    }
}

pub async fn start_rest_server<U, A, S>(
    config: AppConfig,
    services: AppServices<U, A, S>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    let bind_address = (config.host.clone(), config.port);

    info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(configure(services.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    info!("HTTP server stopped");
    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![actix_web::http::header::LOCATION])
        .max_age(3600);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
