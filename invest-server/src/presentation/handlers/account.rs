use crate::application::account_service::AccountService;
use crate::data::account_repository::AccountRepository;
use crate::data::stock_repository::StockRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    AccountResponse, AccountStockResponse, AssociateStockRequest, CreateAccountRequest,
};
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Resource, Scope, web};
use tracing::info;

/// `/users/{user_id}/accounts`. Must be registered ahead of the `/users` scope.
pub fn user_accounts<U, A, S>() -> Resource
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    web::resource("/users/{user_id}/accounts")
        .route(web::post().to(create_account::<U, A, S>))
        .route(web::get().to(list_accounts::<U, A, S>))
}

pub fn scope<U, A, S>() -> Scope
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    web::scope("/accounts")
        .route("/{account_id}/stocks", web::post().to(associate_stock::<U, A, S>))
        .route("/{account_id}/stocks", web::get().to(list_account_stocks::<U, A, S>))
}

async fn create_account<U, A, S>(
    req: HttpRequest,
    service: web::Data<AccountService<U, A, S>>,
    path: web::Path<String>,
    payload: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse, DomainError>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    let user_id = path.into_inner();
    let account_id = service
        .create_account(&user_id, payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user_id,
        account_id = %account_id,
        "account created"
    );

    Ok(HttpResponse::Ok().finish())
}

async fn list_accounts<U, A, S>(
    service: web::Data<AccountService<U, A, S>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    let accounts: Vec<AccountResponse> = service
        .list_accounts(&path.into_inner())
        .await?
        .into_iter()
        .map(AccountResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(accounts))
}

async fn associate_stock<U, A, S>(
    req: HttpRequest,
    service: web::Data<AccountService<U, A, S>>,
    path: web::Path<String>,
    payload: web::Json<AssociateStockRequest>,
) -> Result<HttpResponse, DomainError>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    let position = service
        .associate_stock(&path.into_inner(), payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        account_id = %position.account_id,
        stock_id = %position.stock_id,
        "stock associated"
    );

    Ok(HttpResponse::Ok().finish())
}

async fn list_account_stocks<U, A, S>(
    service: web::Data<AccountService<U, A, S>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    let positions: Vec<AccountStockResponse> = service
        .list_account_stocks(&path.into_inner())
        .await?
        .into_iter()
        .map(AccountStockResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(positions))
}
