use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use futures_util::future::LocalBoxFuture;
use log::warn;

use crate::state::app_state::AppState;
use crate::structs::error::unauthorized_response;
use crate::utils::jwt::AuthError;

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
///
/// On success the authenticated [`Caller`](crate::utils::jwt::Caller) is
/// stored in the request extensions.
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware { service }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: S,
}

fn bearer_token(req: &ServiceRequest) -> Result<&str, &'static str> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("Not authenticated")?;
    let auth_header_str = auth_header
        .to_str()
        .map_err(|_| "Invalid authorization header")?;

    // Scheme is case-insensitive
    match auth_header_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err("Invalid authorization format"),
    }
}

/// Full cause chain, e.g. `Failed to decode JWT: ExpiredSignature`.
fn describe_auth_error(e: &AuthError) -> String {
    match e {
        AuthError::InvalidToken(source) => format!("{:#}", source),
    }
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req.app_data::<web::Data<AppState>>() {
            Some(state) => bearer_token(&req).and_then(|token| {
                state.authorizer.authorize(token).map_err(|e| {
                    warn!("Token rejected: {}", describe_auth_error(&e));
                    "Invalid token"
                })
            }),
            None => Err("Authentication is not configured"),
        };

        match outcome {
            Ok(caller) => {
                req.extensions_mut().insert(caller);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(detail) => {
                warn!("Rejected {} {}: {}", req.method(), req.path(), detail);
                let response = req
                    .into_response(unauthorized_response(detail))
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::{Authorizer, JwtAuthorizer, create_token};

    fn rejection(token: &str) -> String {
        let err = JwtAuthorizer::new("secret").authorize(token).unwrap_err();
        describe_auth_error(&err)
    }

    #[test]
    fn rejection_reason_names_the_cause() {
        let expired = create_token("secret", "admin", -10).unwrap();
        assert!(rejection(&expired).contains("ExpiredSignature"));

        let forged = create_token("other", "admin", 30).unwrap();
        assert!(rejection(&forged).contains("InvalidSignature"));

        let garbage = rejection("not-a-jwt");
        assert!(garbage.starts_with("Failed to decode JWT: "));
        assert!(garbage.len() > "Failed to decode JWT: ".len());
    }
}
