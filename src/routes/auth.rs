use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::{
    ForgotPasswordForm, ForgotPasswordFormPayload, LoginForm, LoginFormPayload, RequestOtpForm,
    RequestOtpFormPayload, VerifyOtpForm, VerifyOtpFormPayload,
};
use crate::repository::RestRepository;
use crate::routes::{
    guest_context, redirect, render_template, service_error_message, session_user, store_user,
};
use crate::services::ServiceError;
use crate::services::auth::{
    forgot_password as forgot_password_service, login as login_service,
    request_otp as request_otp_service, verify_otp as verify_otp_service,
};

#[get("/login")]
pub async fn login_page(
    flash_messages: IncomingFlashMessages,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    if session_user(&session).is_some() {
        return redirect("/categories");
    }
    let context = guest_context(&flash_messages, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    session: Session,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    match login_service(payload, repo.get_ref()).await {
        Ok(user) => {
            if let Err(e) = store_user(&session, &user) {
                log::error!("Failed to persist session: {e}");
                return HttpResponse::InternalServerError().finish();
            }
            redirect("/categories")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid email or password.").send();
            redirect("/login")
        }
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
        Err(err) => {
            FlashMessage::error(service_error_message(&err)).send();
            redirect("/login")
        }
    }
}

#[post("/login/otp/request")]
pub async fn request_otp(
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<RequestOtpForm>,
) -> impl Responder {
    let payload: RequestOtpFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    match request_otp_service(payload, repo.get_ref()).await {
        Ok(()) => FlashMessage::success("One-time code sent. Check your inbox.").send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
        Err(err) => FlashMessage::error(service_error_message(&err)).send(),
    }

    redirect("/login")
}

#[post("/login/otp/verify")]
pub async fn verify_otp(
    session: Session,
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<VerifyOtpForm>,
) -> impl Responder {
    let payload: VerifyOtpFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/login");
        }
    };

    match verify_otp_service(payload, repo.get_ref()).await {
        Ok(user) => {
            if let Err(e) = store_user(&session, &user) {
                log::error!("Failed to persist session: {e}");
                return HttpResponse::InternalServerError().finish();
            }
            redirect("/categories")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("The one-time code was not accepted.").send();
            redirect("/login")
        }
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
        Err(err) => {
            FlashMessage::error(service_error_message(&err)).send();
            redirect("/login")
        }
    }
}

#[get("/forgot-password")]
pub async fn forgot_password_page(
    flash_messages: IncomingFlashMessages,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    if session_user(&session).is_some() {
        return redirect("/categories");
    }
    let context = guest_context(&flash_messages, "forgot-password");
    render_template(&tera, "auth/forgot_password.html", &context)
}

#[post("/forgot-password")]
pub async fn forgot_password(
    repo: web::Data<RestRepository>,
    web::Form(form): web::Form<ForgotPasswordForm>,
) -> impl Responder {
    let payload: ForgotPasswordFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/forgot-password");
        }
    };

    match forgot_password_service(payload, repo.get_ref()).await {
        Ok(()) => {
            FlashMessage::success("If the address is registered, a reset link is on its way.")
                .send();
            redirect("/login")
        }
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
        Err(err) => {
            FlashMessage::error(service_error_message(&err)).send();
            redirect("/forgot-password")
        }
    }
}

#[post("/logout")]
pub async fn logout(session: Session) -> impl Responder {
    session.purge();
    redirect("/login")
}
