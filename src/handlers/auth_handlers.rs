use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result, web};
use bcrypt::verify;
use log::{info, warn};

use crate::state::app_state::AppState;
use crate::structs::auth::{TokenRequest, TokenResponse};
use crate::structs::error::{json_error, unauthorized_response};
use crate::utils::jwt::create_token;

/// OAuth2 password flow: trade admin credentials for a bearer token.
pub async fn login(
    app_state: web::Data<AppState>,
    web::Form(req): web::Form<TokenRequest>,
) -> Result<HttpResponse> {
    let config = &app_state.config;

    // Verify password
    let password_matches = req.username == config.admin_username
        && verify(&req.password, &config.admin_password_hash).map_err(|e| {
            json_error(
                e,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Password verification failed",
            )
        })?;

    if !password_matches {
        warn!("Failed login for {}", req.username);
        return Ok(unauthorized_response("Incorrect username or password"));
    }

    // Generate JWT token
    let access_token = create_token(&config.jwt_secret, &req.username, config.token_ttl_minutes)
        .map_err(|e| {
            json_error(
                format!("{:#}", e),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Token generation failed",
            )
        })?;

    info!("Issued token for {}", req.username);
    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
