// --- File: crates/atende_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Remote API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the scheduling backend, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds. The shared client default applies when unset.
    pub timeout_secs: Option<u64>,
}

// --- Local Storage Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the durable local records (confirmations, session keys).
    pub dir: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}
