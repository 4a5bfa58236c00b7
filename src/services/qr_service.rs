use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb};
use log::warn;
use qrcode::QrCode;

use crate::models::qr_code::StoredQrCode;
use crate::utils::filename::url_from_qr_filename;

/// Writes a QR image for `url` to `path`. The path may carry a non-image extension.
pub trait QrGenerator: Send + Sync {
    fn generate(
        &self,
        url: &str,
        path: &Path,
        fill: Rgb<u8>,
        back: Rgb<u8>,
        size: u32,
    ) -> Result<()>;
}

/// Renders PNG files with the `qrcode` and `image` crates.
pub struct PngQrGenerator;

impl QrGenerator for PngQrGenerator {
    fn generate(
        &self,
        url: &str,
        path: &Path,
        fill: Rgb<u8>,
        back: Rgb<u8>,
        size: u32,
    ) -> Result<()> {
        let code = QrCode::new(url.as_bytes()).context("failed to generate QR code")?;
        let image = code
            .render::<Rgb<u8>>()
            .dark_color(fill)
            .light_color(back)
            .quiet_zone(true)
            .module_dimensions(size, size)
            .build();
        image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("failed to write QR code to {}", path.display()))?;
        Ok(())
    }
}

/// Render into a temp file next to `final_path`, then rename it into place.
///
/// `final_path` only ever holds a complete image. A failed render leaves nothing
/// behind, and concurrent renders of the same URL replace each other whole.
pub fn store_qr_code(
    generator: &dyn QrGenerator,
    url: &str,
    final_path: &Path,
    fill: Rgb<u8>,
    back: Rgb<u8>,
    size: u32,
) -> Result<()> {
    let dir = final_path
        .parent()
        .with_context(|| format!("{} has no parent directory", final_path.display()))?;
    // `.part` keeps the temp file out of listings and download lookups.
    let temp = tempfile::Builder::new()
        .prefix(".qr-")
        .suffix(".png.part")
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;

    // On error the temp file is removed when `temp` drops.
    generator.generate(url, temp.path(), fill, back, size)?;

    temp.persist(final_path)
        .with_context(|| format!("failed to move QR code into {}", final_path.display()))?;
    Ok(())
}

/// Every stored QR image whose filename decodes back to a URL, sorted by filename.
pub async fn list_qr_codes(dir: &Path) -> Result<Vec<StoredQrCode>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read {}", dir.display()))?;

    let mut codes = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let Ok(filename) = entry.file_name().into_string() else {
            continue;
        };
        if !filename.ends_with(".png") {
            continue;
        }
        match url_from_qr_filename(&filename) {
            Ok(url) => codes.push(StoredQrCode { filename, url }),
            Err(e) => warn!("Skipping {}: {}", filename, e),
        }
    }

    codes.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(codes)
}

/// Remove a stored QR image. Returns `false` if it did not exist.
pub async fn delete_qr_code(path: &Path) -> Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to delete {}", path.display())),
    }
}
