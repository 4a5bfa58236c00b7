use serde::Serialize;

/// A QR image found in the storage directory.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredQrCode {
    pub filename: String, // `<encoded-url>.png`
    pub url: String,      // The URL the QR code points to
}
