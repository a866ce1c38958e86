use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::CategoryId;
use crate::repository::RestRepository;
use crate::services::ServiceError;
use crate::services::categories::{parent_options, sub_categories_of};

#[get("/v1/parents")]
pub async fn api_v1_parents(
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    match parent_options(&user, repo.get_ref()).await {
        Ok(parents) => HttpResponse::Ok().json(parents),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Network) => HttpResponse::BadGateway().finish(),
        Err(e) => {
            error!("Failed to list parent categories: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/categories/{parent_id}/subcategories")]
pub async fn api_v1_subcategories(
    parent_id: web::Path<i64>,
    user: AuthenticatedUser,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    let parent_id = match CategoryId::new(parent_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match sub_categories_of(parent_id, &user, repo.get_ref()).await {
        Ok(subs) => HttpResponse::Ok().json(subs),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Network) => HttpResponse::BadGateway().finish(),
        Err(e) => {
            error!("Failed to list sub-categories: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
