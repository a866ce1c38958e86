use actix_session::Session;
use actix_web::{Responder, get};

use crate::routes::{redirect, session_user};

#[get("/")]
pub async fn index(session: Session) -> impl Responder {
    if session_user(&session).is_some() {
        redirect("/categories")
    } else {
        redirect("/login")
    }
}
