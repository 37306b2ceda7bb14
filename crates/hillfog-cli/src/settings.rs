//! CLI settings
//!
//! Loaded from `config/hillfog.{toml,yaml,json}` when present, then
//! overridden by `HILLFOG_*` environment variables (a `.env` file is read
//! first).

use anyhow::Result;
use hillfog_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use hillfog_client::ClientConfig;
use hillfog_core::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config/hillfog";
const ENV_PREFIX: &str = "HILLFOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub timeout_ms: u64,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub session_cookie: Option<String>,

    /// Directory holding the persisted user profile
    pub session_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            session_cookie: None,
            session_dir: PathBuf::from(".hillfog"),
        }
    }
}

impl Settings {
    /// Load from the default config file and the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIG_FILE)
    }

    /// Load from `file` (extension optional) and the environment
    pub fn load_from(file: &str) -> Result<Self> {
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("No usable config ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.base_url.clone())
            .with_timeout_ms(self.timeout_ms)
            .with_page_sizes(self.default_page_size, self.max_page_size);
        if let Some(cookie) = &self.session_cookie {
            config = config.with_session_cookie(cookie.clone());
        }
        config
    }
}
