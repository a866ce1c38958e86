use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryGroupDto};
use crate::forms::categories::{
    DeleteCategoryForm, DeleteCategoryFormPayload, SaveCategoryForm, SaveCategoryFormPayload,
};
use crate::repository::RestRepository;
use crate::routes::{
    base_context, load_expanded, redirect, render_template, service_error_message, store_expanded,
};
use crate::services::ServiceError;
use crate::services::categories::{
    delete_category as delete_category_service, parent_options as parent_options_service,
    save_category as save_category_service, show_categories as show_categories_service,
};
use crate::viewstate::CategoryStore;

use crate::domain::auth::AuthenticatedUser;

#[derive(Deserialize, Debug)]
struct CategoriesQuery {
    search: Option<String>,
    refresh: Option<bool>,
}

#[get("/categories")]
pub async fn show_categories(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    session: Session,
    params: web::Query<CategoriesQuery>,
    repo: web::Data<RestRepository>,
    store: web::Data<CategoryStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut expanded = load_expanded(&session);
    let mut context = base_context(&flash_messages, &user, "categories");

    match show_categories_service(
        &user,
        params.search.as_deref(),
        params.refresh.unwrap_or(false),
        &mut expanded,
        repo.get_ref(),
        store.get_ref(),
    )
    .await
    {
        Ok(page) => {
            store_expanded(&session, &expanded);
            context.insert("load_error", &Option::<String>::None);
            context.insert("groups", &page.groups);
            context.insert("search", &page.search);
            context.insert("total", &page.total);
            context.insert("matched", &page.matched);

            let parents = match parent_options_service(&user, repo.get_ref()).await {
                Ok(parents) => parents,
                Err(e) => {
                    log::error!("Failed to load parent options: {e}");
                    Vec::new()
                }
            };
            context.insert("parent_options", &parents);

            render_template(&tera, "categories/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            session.purge();
            redirect("/login")
        }
        Err(err) => {
            context.insert("load_error", &service_error_message(&err));
            context.insert("groups", &Vec::<CategoryGroupDto>::new());
            context.insert("search", &Option::<String>::None);
            context.insert("total", &0usize);
            context.insert("matched", &0usize);
            context.insert("parent_options", &Vec::<CategoryDto>::new());
            render_template(&tera, "categories/index.html", &context)
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<RestRepository>,
    store: web::Data<CategoryStore>,
    web::Form(form): web::Form<SaveCategoryForm>,
) -> impl Responder {
    let payload: SaveCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match save_category_service(payload, &user, repo.get_ref(), store.get_ref()).await {
        Ok(()) => FlashMessage::success("Category saved.").send(),
        Err(ServiceError::Unauthorized) => {
            session.purge();
            return redirect("/login");
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
        Err(err) => FlashMessage::error(service_error_message(&err)).send(),
    }

    redirect("/categories")
}

#[post("/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i64>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<RestRepository>,
    store: web::Data<CategoryStore>,
    web::Form(form): web::Form<SaveCategoryForm>,
) -> impl Responder {
    let mut payload: SaveCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    payload.id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => Some(id),
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match save_category_service(payload, &user, repo.get_ref(), store.get_ref()).await {
        Ok(()) => FlashMessage::success("Category updated.").send(),
        Err(ServiceError::Unauthorized) => {
            session.purge();
            return redirect("/login");
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
        Err(err) => FlashMessage::error(service_error_message(&err)).send(),
    }

    redirect("/categories")
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i64>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<RestRepository>,
    store: web::Data<CategoryStore>,
    web::Form(form): web::Form<DeleteCategoryForm>,
) -> impl Responder {
    let mut payload: DeleteCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    payload.category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match delete_category_service(payload, &user, repo.get_ref(), store.get_ref()).await {
        Ok(()) => FlashMessage::success("Category deleted.").send(),
        Err(ServiceError::Unauthorized) => {
            session.purge();
            return redirect("/login");
        }
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
        Err(err) => FlashMessage::error(service_error_message(&err)).send(),
    }

    redirect("/categories")
}

#[post("/categories/{category_id}/toggle")]
pub async fn toggle_category(
    category_id: web::Path<i64>,
    _user: AuthenticatedUser,
    session: Session,
) -> impl Responder {
    match CategoryId::new(category_id.into_inner()) {
        Ok(id) => {
            let mut expanded = load_expanded(&session);
            expanded.toggle(id);
            store_expanded(&session, &expanded);
        }
        Err(e) => FlashMessage::error(e.to_string()).send(),
    }

    redirect("/categories")
}
