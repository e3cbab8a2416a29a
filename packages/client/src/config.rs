use pagecraft_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ClientError;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Overrides `apiBaseUrl`
pub const ENV_API_URL: &str = "PAGECRAFT_API_URL";

/// Overrides `authToken`
pub const ENV_API_TOKEN: &str = "PAGECRAFT_API_TOKEN";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the page API (pages live under `{base}/pages`)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api/cms".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Load config from a directory, then apply environment overrides
    pub fn load(cwd: &Path) -> Result<Self, ClientError> {
        let config = Self::load_file(&Self::config_path(cwd))?;
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a config file; a missing file yields the defaults
    pub fn load_file(path: &Path) -> Result<Self, ClientError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: ClientConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(ClientConfig::default())
        }
    }

    pub fn config_path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }

    /// Apply overrides from `lookup` (normally the process environment)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.auth_token = Some(token);
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            auth_token: None,
            editor: EditorConfig::default(),
        }
    }
}
