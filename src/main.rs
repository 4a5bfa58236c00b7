use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use makemeqr::config::app_config::AppConfig;
use makemeqr::routes::init_routes;
use makemeqr::services::qr_service::PngQrGenerator;
use makemeqr::state::app_state::AppState;
use makemeqr::utils::jwt::JwtAuthorizer;

fn load_config() -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env()?;
    std::fs::create_dir_all(&config.qr_directory).with_context(|| {
        format!(
            "failed to create QR code directory {}",
            config.qr_directory.display()
        )
    })?;
    Ok(config)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    let bind = (config.host.clone(), config.port);
    let download_folder = config.download_folder.clone();
    info!(
        "Storing QR codes in {}, serving downloads under /{}",
        config.qr_directory.display(),
        download_folder
    );

    // Create shared state
    let app_state = web::Data::new(AppState {
        authorizer: Box::new(JwtAuthorizer::new(config.jwt_secret.clone())),
        generator: Arc::new(PngQrGenerator),
        config,
    });

    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:4173")
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        let download_folder = download_folder.clone();
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(move |cfg| init_routes(cfg, &download_folder))
    })
    .bind(bind)?
    .run()
    .await
}
