use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use anyhow::Context;
use chrono::Utc;
use dotenvy::dotenv;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

mod api;
mod auth;
mod config;
mod docs;
mod engine;
mod error;
mod model;
mod models;
mod routes;
mod store;
mod utils;

use auth::otp::OtpStore;
use config::Config;
use store::Store;
use utils::clock::{Clock, SystemClock};

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Attendance System API is running!",
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": {
            "login": "/api/login",
            "attendance": "/api/attendance",
            "users": "/api/users"
        }
    }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = Data::new(
        Store::open(&config.data_file)
            .with_context(|| format!("opening data file {}", config.data_file.display()))?,
    );
    let otps = Data::new(OtpStore::new(Duration::from_secs(config.otp_ttl_secs)));
    let clock: Data<dyn Clock> = Data::from(Arc::new(SystemClock) as Arc<dyn Clock>);

    let server_addr = config.server_addr.clone();
    let config_data = Data::new(config.clone());

    info!(addr = %server_addr, office = ?config.office(), "Attendance backend listening");

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .app_data(otps.clone())
            .app_data(clock.clone())
            .app_data(config_data.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn health_check() {
        let app = test::init_service(App::new().service(index)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["endpoints"]["login"], "/api/login");
        assert_eq!(body["endpoints"]["attendance"], "/api/attendance");
        assert_eq!(body["endpoints"]["users"], "/api/users");
        assert!(body["timestamp"].is_string());
    }
}
