pub mod settings;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub share_base_url: String,
    pub qr_service_url: String,
    pub qr_size_px: u32,
    pub upload_tick_ms: u64,
    pub upload_step_percent: u8,
    pub upload_completion_delay_ms: u64,
    pub accepted_types: Vec<String>,
    pub max_preview_size_mb: u64,
    pub download_directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let accepted_types = [
            "image/*",
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "text/*",
            "video/*",
            "audio/*",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            share_base_url: "https://sharecloudly.com".to_string(),
            qr_service_url: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            qr_size_px: 200,
            upload_tick_ms: 100,
            upload_step_percent: 5,
            upload_completion_delay_ms: 400,
            accepted_types,
            max_preview_size_mb: 10,
            download_directory: dirs::download_dir(),
        }
    }
}
