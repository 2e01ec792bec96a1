use crate::application::user_service::UserService;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::parse_id;
use crate::presentation::dto::{
    CreateUserRequest, CreatedUserResponse, UpdateUserRequest, UserResponse,
};
use crate::presentation::utils::request_id;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::info;

pub fn scope<R: UserRepository + 'static>() -> Scope {
    web::scope("/users")
        .route("", web::post().to(create_user::<R>))
        .route("", web::get().to(list_users::<R>))
        .route("/{user_id}", web::get().to(get_user::<R>))
        .route("/{user_id}", web::put().to(update_user::<R>))
        .route("/{user_id}", web::delete().to(delete_user::<R>))
}

async fn create_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let user_id = service.create_user(payload.into_inner()).await?;

    info!(request_id = %request_id(&req), user_id = %user_id, "user created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/v1/users/{}", user_id)))
        .json(CreatedUserResponse { user_id }))
}

async fn get_user<R: UserRepository + 'static>(
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let raw = path.into_inner();
    let user_id = parse_id(&raw)?;
    let user = service
        .get_user_by_id(&raw)
        .await?
        .ok_or(DomainError::UserNotFound(user_id))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn list_users<R: UserRepository + 'static>(
    service: web::Data<UserService<R>>,
) -> Result<HttpResponse, DomainError> {
    let users: Vec<UserResponse> = service
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

async fn update_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let raw = path.into_inner();
    service.update_user_by_id(&raw, payload.into_inner()).await?;

    info!(request_id = %request_id(&req), user_id = %raw, "user update handled");

    Ok(HttpResponse::NoContent().finish())
}

async fn delete_user<R: UserRepository + 'static>(
    req: HttpRequest,
    service: web::Data<UserService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let raw = path.into_inner();
    service.delete_by_id(&raw).await?;

    info!(request_id = %request_id(&req), user_id = %raw, "user delete handled");

    Ok(HttpResponse::NoContent().finish())
}
