use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    // The storage directory is the only dependency
    let storage_ok = tokio::fs::metadata(&state.config.qr_directory)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if storage_ok {
        HttpResponse::Ok().json(serde_json::json!({ "success": true }))
    } else {
        HttpResponse::InternalServerError()
            .json(serde_json::json!({ "success": false, "error": "QR code storage unavailable" }))
    }
}
