use actix_web::http::StatusCode;
use actix_web::web;

use crate::handlers::auth_handlers::login;
use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{
    create_qr_code, delete_qr_code, download_qr_code, list_qr_codes,
};
use crate::middlewares::authmw::JwtAuth;
use crate::structs::error::json_error;

/// Malformed bodies are schema violations, reported as 422 like field errors.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        json_error(err, StatusCode::UNPROCESSABLE_ENTITY, detail)
    }));
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        json_error(err, StatusCode::UNPROCESSABLE_ENTITY, detail)
    }));
}

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig, download_folder: &str) {
    extractor_configs(cfg);

    // Public routes - no auth required
    cfg.route("/token", web::post().to(login));
    cfg.route("/health", web::get().to(health_check));
    cfg.route(
        &format!("/{}/{{qr_filename}}", download_folder),
        web::get().to(download_qr_code),
    );

    // QR code routes - require a bearer token
    cfg.service(
        web::scope("/qr-codes")
            .wrap(JwtAuth)
            .route("/", web::post().to(create_qr_code))
            .route("/", web::get().to(list_qr_codes))
            .route("/{qr_filename}", web::delete().to(delete_qr_code)),
    );
}
