//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::ooxml::opc::ReadLimits;
use crate::pipeline::ImageScope;
use crate::translate::google::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    /// Which pictures a run referencing images carries over
    pub image_scope: ImageScope,
    /// Decompression bounds for uploaded packages
    pub read_limits: ReadLimits,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where translated documents are written and served from
    pub output_dir: PathBuf,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Language list to use instead of the built-in one
    pub languages_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                output_dir: PathBuf::from("static"),
                max_upload_mb: 25,
            },
            backend: BackendConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: None,
                languages_path: None,
            },
            image_scope: ImageScope::default(),
            read_limits: ReadLimits::default(),
        }
    }
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Config {
    /// Read `DOCTRANS_*` variables; unset ones keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = var("DOCTRANS_HOST") {
            config.server.host = host;
        }
        if let Some(port) = var("DOCTRANS_PORT") {
            config.server.port = parse("DOCTRANS_PORT", &port)?;
        }
        if let Some(dir) = var("DOCTRANS_OUTPUT_DIR") {
            config.server.output_dir = PathBuf::from(dir);
        }
        if let Some(mb) = var("DOCTRANS_MAX_UPLOAD_MB") {
            config.server.max_upload_mb = parse("DOCTRANS_MAX_UPLOAD_MB", &mb)?;
        }
        if let Some(url) = var("DOCTRANS_BACKEND_URL") {
            config.backend.base_url = url;
        }
        if let Some(secs) = var("DOCTRANS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse("DOCTRANS_HTTP_TIMEOUT_SECS", &secs)?;
            config.backend.timeout = Some(Duration::from_secs(secs));
        }
        config.backend.languages_path = var("DOCTRANS_LANGUAGES").map(PathBuf::from);
        if let Some(scope) = var("DOCTRANS_IMAGE_SCOPE") {
            config.image_scope = parse("DOCTRANS_IMAGE_SCOPE", &scope)?;
        }
        if let Some(mb) = var("DOCTRANS_MAX_PART_MB") {
            let mb: u64 = parse("DOCTRANS_MAX_PART_MB", &mb)?;
            config.read_limits.max_part_size = mb.saturating_mul(1024 * 1024);
        }
        if let Some(mb) = var("DOCTRANS_MAX_EXPANDED_MB") {
            let mb: u64 = parse("DOCTRANS_MAX_EXPANDED_MB", &mb)?;
            config.read_limits.max_total_size = mb.saturating_mul(1024 * 1024);
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
