use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Result, web};
use log::{error, info};
use validator::Validate;

use crate::services::qr_service;
use crate::state::app_state::AppState;
use crate::structs::error::{error_response, json_error};
use crate::structs::qr_request::{QrCodeConflict, QrCodeListItem, QrCodeRequest, QrCodeResponse};
use crate::utils::filename::{FilenameError, qr_filename, url_from_qr_filename};
use crate::utils::links::{LinkAction, generate_links};

fn internal_error(context: &str, e: impl std::fmt::Display) -> actix_web::Error {
    error!("{}: {}", context, e);
    json_error(
        format!("{}: {}", context, e),
        StatusCode::INTERNAL_SERVER_ERROR,
        context,
    )
}

fn invalid_filename(e: FilenameError) -> HttpResponse {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// Create a QR code for a URL, unless one is already stored.
pub async fn create_qr_code(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<QrCodeRequest>,
) -> Result<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(error_response(StatusCode::UNPROCESSABLE_ENTITY, errors));
    }
    info!("Creating QR code for URL: {}", req.url);

    let config = &app_state.config;
    let qr_filename = match qr_filename(&req.url) {
        Ok(name) => name,
        Err(e) => return Ok(invalid_filename(e)),
    };
    let qr_code_full_path = config.qr_path(&qr_filename);
    let qr_code_download_url = config.download_url(&qr_filename);
    let links = generate_links(
        LinkAction::Create,
        &qr_filename,
        &config.server_base_url,
        &qr_code_download_url,
    );

    // Not atomic with the write below: two concurrent requests for the same
    // URL may both generate. Each lands by rename, so the last complete image wins.
    let exists = tokio::fs::try_exists(&qr_code_full_path)
        .await
        .map_err(|e| internal_error("Failed to check QR code storage", e))?;
    if exists {
        info!("QR code already exists.");
        return Ok(HttpResponse::Conflict().json(QrCodeConflict {
            message: "QR code already exists.".to_string(),
            links,
        }));
    }

    let generator = Arc::clone(&app_state.generator);
    let (fill, back) = (config.fill_color, config.back_color);
    let QrCodeRequest { url, size } = req;
    web::block(move || {
        qr_service::store_qr_code(&*generator, &url, &qr_code_full_path, fill, back, size)
    })
        .await
        .map_err(|e| internal_error("QR code generation was interrupted", e))?
        .map_err(|e| internal_error("Failed to generate QR code", format!("{:#}", e)))?;

    Ok(HttpResponse::Created().json(QrCodeResponse {
        message: "QR code created successfully.".to_string(),
        qr_code_url: qr_code_download_url,
        links,
    }))
}

/// List every stored QR code.
pub async fn list_qr_codes(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let config = &app_state.config;
    let codes = qr_service::list_qr_codes(&config.qr_directory)
        .await
        .map_err(|e| internal_error("Failed to list QR codes", format!("{:#}", e)))?;

    let items: Vec<QrCodeListItem> = codes
        .into_iter()
        .map(|code| {
            let qr_code_url = config.download_url(&code.filename);
            let links = generate_links(
                LinkAction::List,
                &code.filename,
                &config.server_base_url,
                &qr_code_url,
            );
            QrCodeListItem {
                message: "QR code available.".to_string(),
                url: code.url,
                qr_code_url,
                links,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(items))
}

/// Delete a stored QR code by filename.
pub async fn delete_qr_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let qr_filename = path.into_inner();
    // Only codec-produced names are accepted, which rules out path traversal.
    if let Err(e) = url_from_qr_filename(&qr_filename) {
        return Ok(invalid_filename(e));
    }

    let config = &app_state.config;
    let deleted = qr_service::delete_qr_code(&config.qr_path(&qr_filename))
        .await
        .map_err(|e| internal_error("Failed to delete QR code", format!("{:#}", e)))?;

    if !deleted {
        return Ok(error_response(StatusCode::NOT_FOUND, "QR code not found"));
    }

    info!("Deleted QR code {}", qr_filename);
    let mut response = HttpResponse::NoContent();
    for link in generate_links(LinkAction::Delete, &qr_filename, &config.server_base_url, "") {
        response.append_header((header::LINK, format!("<{}>; rel=\"{}\"", link.href, link.rel)));
    }
    Ok(response.finish())
}

/// Serve a stored QR image.
pub async fn download_qr_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let qr_filename = path.into_inner();
    if let Err(e) = url_from_qr_filename(&qr_filename) {
        return Ok(invalid_filename(e));
    }

    match tokio::fs::read(app_state.config.qr_path(&qr_filename)).await {
        Ok(bytes) => Ok(HttpResponse::Ok().content_type("image/png").body(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(error_response(StatusCode::NOT_FOUND, "QR code not found"))
        }
        Err(e) => Err(internal_error("Failed to read QR code", e)),
    }
}
