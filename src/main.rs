use actix_files::Files;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use grocery_admin::models::config::ServerConfig;
use grocery_admin::repository::RestRepository;
use grocery_admin::routes::{api, auth, categories, main as main_routes};
use grocery_admin::viewstate::CategoryStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("GROCERY_ADMIN"))
        .build()
        .map_err(|e| std::io::Error::other(format!("configuration error: {e}")))?;
    let server_config: ServerConfig = settings
        .try_deserialize()
        .map_err(|e| std::io::Error::other(format!("configuration error: {e}")))?;

    let secret_key = match server_config.session_secret.as_deref() {
        Some(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        _ => {
            log::warn!("session_secret missing or shorter than 64 bytes; generating a key");
            Key::generate()
        }
    };

    let tera = Tera::new("templates/**/*.html")
        .map_err(|e| std::io::Error::other(format!("template error: {e}")))?;

    let repo = RestRepository::new(server_config.api_url.clone());
    let store = web::Data::new(CategoryStore::new());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = server_config.bind_address.clone();
    log::info!(
        "Starting grocery admin on {bind_address}, remote API at {}",
        server_config.api_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(store.clone())
            .service(main_routes::index)
            .service(auth::login_page)
            .service(auth::login)
            .service(auth::request_otp)
            .service(auth::verify_otp)
            .service(auth::forgot_password_page)
            .service(auth::forgot_password)
            .service(auth::logout)
            .service(categories::show_categories)
            .service(categories::add_category)
            .service(categories::update_category)
            .service(categories::delete_category)
            .service(categories::toggle_category)
            .service(api::api_v1_parents)
            .service(api::api_v1_subcategories)
            .service(Files::new("/assets", "./assets"))
    })
    .bind(bind_address)?
    .run()
    .await
}
