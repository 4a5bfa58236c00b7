pub mod auth;
pub mod error;
pub mod qr_request;
