//! Branding assets for the quote document.

use crate::storage::ObjectStorage;

/// Storage key of the studio logo inside the branding bucket.
pub const LOGO_KEY: &str = "strelka-logo.png";

/// Minimal embedded placeholder (1x1 transparent PNG).
///
/// Doubles as a sentinel: when the storage returns exactly these bytes the
/// bucket holds no real asset and the renderer uses the text wordmark instead.
pub const FALLBACK_LOGO: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Logo bytes resolved for one render, if a real asset exists.
#[derive(Debug, Clone, Default)]
pub struct BrandingAssets {
    logo: Option<Vec<u8>>,
}

impl BrandingAssets {
    /// Placeholder assets; the renderer falls back to the text wordmark.
    pub fn placeholder() -> Self {
        Self { logo: None }
    }

    pub fn with_logo(logo: Vec<u8>) -> Self {
        Self { logo: Some(logo) }
    }

    /// Fetch the logo from storage. Never fails: a fetch error or the
    /// placeholder sentinel both degrade to the text wordmark.
    pub async fn load(storage: &dyn ObjectStorage) -> Self {
        match storage.download_file(LOGO_KEY).await {
            Ok(bytes) if !bytes.is_empty() && bytes != FALLBACK_LOGO => Self { logo: Some(bytes) },
            Ok(_) => {
                log::info!("Branding logo is the placeholder sentinel, using text wordmark");
                Self { logo: None }
            }
            Err(e) => {
                log::warn!("Could not load branding logo ({}), using text wordmark", e);
                Self { logo: None }
            }
        }
    }

    pub fn logo(&self) -> Option<&[u8]> {
        self.logo.as_deref()
    }

    /// True when a real (non-sentinel) logo asset is available.
    pub fn has_real_logo(&self) -> bool {
        self.logo.is_some()
    }
}
