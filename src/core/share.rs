//! Builds the (fake) shareable link and QR image URL for a record.
//!
//! Nothing here grants access to anything: links are pure string templates.

use super::FileId;
use crate::config::AppConfig;

/// Link templates derived from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    base_url: String,
    qr_service_url: String,
    qr_size_px: u32,
}

impl ShareLinks {
    pub fn new(base_url: &str, qr_service_url: &str, qr_size_px: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            qr_service_url: qr_service_url.to_string(),
            qr_size_px,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.share_base_url,
            &config.qr_service_url,
            config.qr_size_px,
        )
    }

    /// `{base-url}/share/{id}`.
    pub fn share_link(&self, id: &FileId) -> String {
        format!("{}/share/{}", self.base_url, id)
    }

    /// URL of a QR image encoding `text`, served by the configured third party.
    pub fn qr_code_url(&self, text: &str) -> String {
        let separator = if self.qr_service_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}size={}x{}&data={}",
            self.qr_service_url,
            separator,
            self.qr_size_px,
            self.qr_size_px,
            urlencoding::encode(text)
        )
    }
}
