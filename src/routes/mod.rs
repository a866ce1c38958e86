use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::body::BoxBody;
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::services::ServiceError;
use crate::viewstate::ExpandedNodes;
use crate::{AUTH_SESSION_KEY, EXPANDED_SESSION_KEY};

pub mod api;
pub mod auth;
pub mod categories;
pub mod main;

/// Shown for transport failures instead of the raw error.
pub const CONNECTIVITY_MESSAGE: &str =
    "The server could not be reached. Check your connection and try again.";

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context for pages behind authentication.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let mut context = guest_context(flash_messages, current_page);
    context.insert("current_user", user);
    context
}

/// Context for the unauthenticated screens.
pub fn guest_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("current_user", &Option::<AuthenticatedUser>::None);
    context
}

/// Message shown inline for a service failure.
pub fn service_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Network => CONNECTIVITY_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

pub fn session_user(session: &Session) -> Option<AuthenticatedUser> {
    session
        .get::<AuthenticatedUser>(AUTH_SESSION_KEY)
        .ok()
        .flatten()
}

pub fn store_user(session: &Session, user: &AuthenticatedUser) -> actix_web::Result<()> {
    session.insert(AUTH_SESSION_KEY, user)?;
    session.renew();
    Ok(())
}

pub fn load_expanded(session: &Session) -> ExpandedNodes {
    session
        .get::<ExpandedNodes>(EXPANDED_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

pub fn store_expanded(session: &Session, expanded: &ExpandedNodes) {
    if let Err(e) = session.insert(EXPANDED_SESSION_KEY, expanded) {
        log::warn!("Failed to persist expanded rows: {e}");
    }
}

/// Raised by the [`AuthenticatedUser`] extractor; answers with a redirect
/// to the login screen.
#[derive(Debug, thiserror::Error)]
#[error("not authenticated")]
pub struct NotAuthenticated;

impl ResponseError for NotAuthenticated {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        redirect("/login")
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        match session_user(&session) {
            Some(user) => ready(Ok(user)),
            None => ready(Err(NotAuthenticated.into())),
        }
    }
}
