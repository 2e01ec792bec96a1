use crate::application::stock_service::StockService;
use crate::data::stock_repository::StockRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::CreateStockRequest;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::info;

pub fn scope<R: StockRepository + 'static>() -> Scope {
    web::scope("/stocks").route("", web::post().to(create_stock::<R>))
}

async fn create_stock<R: StockRepository + 'static>(
    req: HttpRequest,
    service: web::Data<StockService<R>>,
    payload: web::Json<CreateStockRequest>,
) -> Result<HttpResponse, DomainError> {
    let stock = service.create_stock(payload.into_inner()).await?;

    info!(request_id = %request_id(&req), stock_id = %stock.stock_id, "stock created");

    Ok(HttpResponse::Ok().finish())
}
