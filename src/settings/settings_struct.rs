use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::rulesets::BLACKMATRIX7_BASE_URL;
use crate::models::GroupCategory;
use crate::parser::{NativeFidelity, ParseSettings};
use crate::utils::file_get;
use crate::utils::http::{HttpConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported settings file extension: {0}")]
    UnsupportedFormat(String),
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_cache_dir() -> String {
    "cache".to_string()
}

fn default_cache_expiry() -> u64 {
    86400
}

fn default_ruleset_base_url() -> String {
    BLACKMATRIX7_BASE_URL.to_string()
}

fn default_groups() -> Vec<GroupCategory> {
    vec![
        GroupCategory::Streaming,
        GroupCategory::Social,
        GroupCategory::Ai,
        GroupCategory::Adblock,
    ]
}

/// Settings structure to hold the converter configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Timeout for every HTTP request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Proxy for subscription and ruleset downloads
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Seconds a cached ruleset stays valid
    #[serde(default = "default_cache_expiry")]
    pub cache_expiry: u64,

    /// YAML template providing the non generated sections
    #[serde(default)]
    pub base_config: Option<String>,
    #[serde(default = "default_ruleset_base_url")]
    pub ruleset_base_url: String,

    #[serde(default)]
    pub strict_parse: bool,
    #[serde(default)]
    pub native_fidelity: NativeFidelity,
    /// Emit `rule-providers` instead of expanding rulesets inline
    #[serde(default)]
    pub rule_providers: bool,
    /// Categories used when none are requested
    #[serde(default = "default_groups")]
    pub default_groups: Vec<GroupCategory>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            proxy: None,
            cache_dir: default_cache_dir(),
            cache_expiry: default_cache_expiry(),
            base_config: None,
            ruleset_base_url: default_ruleset_base_url(),
            strict_parse: false,
            native_fidelity: NativeFidelity::default(),
            rule_providers: false,
            default_groups: default_groups(),
        }
    }
}

impl Settings {
    /// Load settings from a file, the format is picked by extension
    pub fn load(path: &str) -> Result<Self, SettingsError> {
        let content = file_get(path).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })?;

        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content),
            "toml" => Self::from_toml(&content),
            other => Err(SettingsError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        // An empty document deserializes as null
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.request_timeout),
            proxy: self.proxy.clone().filter(|p| !p.is_empty()),
        }
    }

    pub fn parse_settings(&self) -> ParseSettings {
        ParseSettings {
            strict: self.strict_parse,
            native_fidelity: self.native_fidelity,
        }
    }

    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.cache_expiry)
    }
}
