use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the STT API key
pub const ENV_STT_API_KEY: &str = "EMOTION_COMPANION_STT_API_KEY";
/// Environment variable overriding the STT server URL
pub const ENV_STT_URL: &str = "EMOTION_COMPANION_STT_URL";
/// Environment variable overriding the face detector URL
pub const ENV_FACE_URL: &str = "EMOTION_COMPANION_FACE_URL";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: u32,
    pub bind_address: String,
    pub port: u16,

    // Face emotion detector
    pub face_detector_url: String,
    pub face_detector_timeout_secs: u64,

    // Speech-to-text
    pub stt_server_url: String,
    pub stt_model: String,
    pub stt_api_key: Option<String>,
    pub stt_timeout_secs: u64,

    /// Cap on request bodies (snapshots and audio uploads)
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: 1,
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
            face_detector_url: String::new(),
            face_detector_timeout_secs: 15,
            stt_server_url: String::new(),
            stt_model: "whisper-1".to_string(),
            stt_api_key: None,
            stt_timeout_secs: 120,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".emotioncompanion"))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file or return default
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                debug!("Failed to load config, using default: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")
    }

    /// Apply environment overrides for endpoints and secrets
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_STT_API_KEY) {
            self.stt_api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_STT_URL) {
            self.stt_server_url = url;
        }
        if let Some(url) = non_empty(ENV_FACE_URL) {
            self.face_detector_url = url;
        }
    }

    /// Check the settings the server cannot start without
    pub fn validate(&self) -> Result<()> {
        self.bind_address
            .parse::<IpAddr>()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))?;

        validate_service_url("face_detector_url", &self.face_detector_url)?;
        validate_service_url("stt_server_url", &self.stt_server_url)?;

        if self.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be greater than zero");
        }
        Ok(())
    }

    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Empty means "not configured"; anything else must be a plain http(s) URL
fn validate_service_url(field: &str, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Ok(());
    }
    let parsed = reqwest::Url::parse(url).with_context(|| format!("{} is not a valid URL", field))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("{} must use http or https, got: {}", field, parsed.scheme());
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        bail!("{} must not contain credentials", field);
    }
    Ok(())
}
