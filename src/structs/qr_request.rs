use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_size() -> u32 {
    10
}

#[derive(Debug, Deserialize, Validate)]
pub struct QrCodeRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
    /// Pixels per QR module. Capped so rendered images stay a bounded size.
    #[serde(default = "default_size")]
    #[validate(range(
        min = 1,
        max = 100,
        message = "Size must be between 1 and 100 (server limit on pixels per module)"
    ))]
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub action: String,
}

impl Link {
    pub fn new(rel: &str, href: String, action: &str) -> Self {
        Self {
            rel: rel.to_string(),
            href,
            action: action.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    pub message: String,
    pub qr_code_url: String,
    pub links: Vec<Link>,
}

/// Body of a 409: the existing resource is reachable through `links`.
#[derive(Debug, Serialize)]
pub struct QrCodeConflict {
    pub message: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct QrCodeListItem {
    pub message: String,
    pub url: String,
    pub qr_code_url: String,
    pub links: Vec<Link>,
}
