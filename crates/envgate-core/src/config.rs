use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{EnvgateError, EnvgateResult};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_HANDOFF_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOGIN_URL: &str = "http://localhost:3000/login";
pub const DEFAULT_BUILDER_PATH: &str = "crm/builder";

const CONFIG_DIR_NAME: &str = "envgate";
const CONFIG_FILE_NAME: &str = "envgate.toml";
const SELECTION_FILE_NAME: &str = "current-environment";

/// Environment variables consulted after the config file
pub const ENV_BACKEND_URL: &str = "ENVGATE_BACKEND_URL";
pub const ENV_HANDOFF_URL: &str = "ENVGATE_HANDOFF_URL";
pub const ENV_LOGIN_URL: &str = "ENVGATE_LOGIN_URL";
pub const ENV_SESSION: &str = "ENVGATE_SESSION";
pub const ENV_SELECTION_FILE: &str = "ENVGATE_SELECTION_FILE";

/// Runtime configuration for envgate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvgateConfig {
    /// Identity and environment backend
    pub backend_url: Url,
    /// External application that receives the handoff
    pub handoff_url: Url,
    /// Path of the builder view, relative to `handoff_url`
    pub builder_path: String,
    /// Login entry point used when the session guard fails
    pub login_url: Url,
    /// File holding the selected environment name
    pub selection_file: PathBuf,
    /// Session id sent as the `sid` cookie
    pub session_cookie: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for EnvgateConfig {
    fn default() -> Self {
        Self {
            backend_url: parse_default(DEFAULT_BACKEND_URL),
            handoff_url: parse_default(DEFAULT_HANDOFF_URL),
            builder_path: DEFAULT_BUILDER_PATH.to_string(),
            login_url: parse_default(DEFAULT_LOGIN_URL),
            selection_file: default_selection_file(),
            session_cookie: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl EnvgateConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> EnvgateResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Create config from TOML string
    pub fn from_toml(content: &str) -> EnvgateResult<Self> {
        toml::from_str(content)
            .map_err(|e| EnvgateError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Convert config to TOML string
    pub fn to_toml(&self) -> EnvgateResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EnvgateError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Resolve the effective configuration: defaults, then the given file (or
    /// the default config file when it exists), then environment variables.
    pub fn load(path: Option<&Path>) -> EnvgateResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_config_file();
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> EnvgateResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BACKEND_URL) {
            self.backend_url = Url::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_HANDOFF_URL) {
            self.handoff_url = Url::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_LOGIN_URL) {
            self.login_url = Url::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_SESSION) {
            if !value.trim().is_empty() {
                self.session_cookie = Some(value.trim().to_string());
            }
        }
        if let Some(value) = lookup(ENV_SELECTION_FILE) {
            self.selection_file = PathBuf::from(value);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> EnvgateResult<()> {
        for (label, url) in [
            ("backend_url", &self.backend_url),
            ("handoff_url", &self.handoff_url),
            ("login_url", &self.login_url),
        ] {
            if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
                return Err(EnvgateError::config(format!(
                    "{} must be an http(s) URL: {}",
                    label, url
                )));
            }
        }

        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(EnvgateError::config("Timeouts must be greater than zero"));
        }

        if self.selection_file.as_os_str().is_empty() {
            return Err(EnvgateError::config("selection_file must not be empty"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_default(url: &str) -> Url {
    Url::parse(url).expect("default URLs are valid")
}

/// Get the default config file location
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".envgate"))
        .join(CONFIG_FILE_NAME)
}

/// Get the default selection file location
fn default_selection_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".envgate"))
        .join(SELECTION_FILE_NAME)
}
