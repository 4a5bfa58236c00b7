use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bcrypt::{DEFAULT_COST, hash};
use image::Rgb;

use crate::utils::color::parse_color;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub qr_directory: PathBuf,
    /// Public base URL without a trailing slash.
    pub server_base_url: String,
    /// Route prefix the PNG files are served under, without slashes.
    pub download_folder: String,
    pub fill_color: Rgb<u8>,
    pub back_color: Rgb<u8>,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub admin_username: String,
    pub admin_password_hash: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let port = var_or("PORT", "8000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;
        let token_ttl_minutes = var_or("ACCESS_TOKEN_EXPIRE_MINUTES", "30")
            .parse::<i64>()
            .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?;

        let fill_color = parse_color(&var_or("FILL_COLOR", "red")).context("FILL_COLOR")?;
        let back_color = parse_color(&var_or("BACK_COLOR", "white")).context("BACK_COLOR")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        let admin_password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD not set")?;
        let admin_password_hash =
            hash(admin_password, DEFAULT_COST).context("Failed to hash ADMIN_PASSWORD")?;

        let download_folder = var_or("SERVER_DOWNLOAD_FOLDER", "downloads")
            .trim_matches('/')
            .to_string();
        if download_folder.is_empty() || download_folder == "qr-codes" {
            bail!("SERVER_DOWNLOAD_FOLDER must be a non-empty prefix other than qr-codes");
        }

        Ok(Self {
            host: var_or("HOST_BIND", "127.0.0.1"),
            port,
            qr_directory: PathBuf::from(var_or("QR_CODE_DIR", "./qr_codes")),
            server_base_url: var_or("SERVER_BASE_URL", "http://localhost:8000")
                .trim_end_matches('/')
                .to_string(),
            download_folder,
            fill_color,
            back_color,
            jwt_secret,
            token_ttl_minutes,
            admin_username: var_or("ADMIN_USER", "admin"),
            admin_password_hash,
        })
    }

    /// Externally reachable URL of a stored QR image.
    pub fn download_url(&self, qr_filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.server_base_url, self.download_folder, qr_filename
        )
    }

    pub fn qr_path(&self, qr_filename: &str) -> PathBuf {
        self.qr_directory.join(qr_filename)
    }
}
