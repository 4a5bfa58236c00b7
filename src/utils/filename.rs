use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

/// Extension of every stored QR image.
pub const QR_EXTENSION: &str = "png";

/// Longest stem that still fits a 255-byte filename once `.png` is appended.
pub const MAX_STEM_LEN: usize = 255 - QR_EXTENSION.len() - 1;

/// Longest URL, in bytes, whose stem fits [`MAX_STEM_LEN`].
pub const MAX_URL_LEN: usize = MAX_STEM_LEN * 3 / 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilenameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed filename: {0}")]
    MalformedFilename(String),
}

/// Encode a URL into a filesystem-safe stem (URL-safe base64, no padding).
pub fn encode_url_to_filename(url: &str) -> Result<String, FilenameError> {
    if url.is_empty() {
        return Err(FilenameError::InvalidInput("URL must not be empty".to_string()));
    }

    let stem = URL_SAFE_NO_PAD.encode(url.as_bytes());
    if stem.len() > MAX_STEM_LEN {
        return Err(FilenameError::InvalidInput(format!(
            "URL is too long to be stored ({} bytes, limit is {} bytes)",
            url.len(),
            MAX_URL_LEN
        )));
    }

    Ok(stem)
}

/// Exact inverse of [`encode_url_to_filename`].
pub fn decode_filename_to_url(stem: &str) -> Result<String, FilenameError> {
    if stem.is_empty() {
        return Err(FilenameError::MalformedFilename("empty filename".to_string()));
    }
    if let Some(c) = stem
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(FilenameError::MalformedFilename(format!(
            "unexpected character {c:?}"
        )));
    }

    // The decoder rejects non-zero trailing bits, so only canonical stems decode.
    let bytes = URL_SAFE_NO_PAD
        .decode(stem)
        .map_err(|e| FilenameError::MalformedFilename(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| FilenameError::MalformedFilename(e.to_string()))
}

/// Full stored filename for a URL, e.g. `aHR0cHM6Ly9leGFtcGxlLmNvbQ.png`.
pub fn qr_filename(url: &str) -> Result<String, FilenameError> {
    Ok(format!("{}.{}", encode_url_to_filename(url)?, QR_EXTENSION))
}

/// Recover the URL a stored filename was generated for.
pub fn url_from_qr_filename(filename: &str) -> Result<String, FilenameError> {
    let stem = filename
        .strip_suffix(QR_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .ok_or_else(|| {
            FilenameError::MalformedFilename(format!("expected a .{QR_EXTENSION} file"))
        })?;

    decode_filename_to_url(stem)
}
