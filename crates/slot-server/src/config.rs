//! Server configuration file support.
//!
//! The file is the engine's availability config with an extra `[server]` table:
//!
//! ```toml
//! time_zone = "Europe/Budapest"
//!
//! [schedule]
//! monday = { open = "08:30", close = "16:00" }
//!
//! [server]
//! locale = "hu"
//! allowed_origins = ["https://example.com"]
//!
//! [server.google]
//! calendar_id = "practice@group.calendar.google.com"
//! api_key_env = "GOOGLE_CALENDAR_API_KEY"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use slot_engine::{AvailabilityConfig, Locale};

use crate::error::ServerError;

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(flatten)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub google: Option<GoogleSettings>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            allowed_origins: default_allowed_origins(),
            google: None,
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

/// Remote calendar settings. The API key itself is read from the named
/// environment variable so it never lives in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSettings {
    pub calendar_id: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_api_key_env() -> String {
    "GOOGLE_CALENDAR_API_KEY".to_string()
}

fn default_base_url() -> String {
    DEFAULT_GOOGLE_BASE_URL.to_string()
}

impl ServerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ServerError> {
        toml::from_str(content)
            .map_err(|e| ServerError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}
