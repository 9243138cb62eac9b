//! File storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for payment proofs and QR-code images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored files.
    #[serde(default = "default_root")]
    pub root_path: String,
    /// Public base URL under which stored files are served.
    #[serde(default = "default_public_base")]
    pub public_base_url: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: u64,
}

fn default_root() -> String {
    "data/storage".to_string()
}

fn default_public_base() -> String {
    "/files".to_string()
}

fn default_max_upload() -> u64 {
    5 * 1024 * 1024
}
