use std::collections::{BTreeMap, HashMap};
use std::io;

use log::{debug, info, warn};
use reqwest::Client;
use thiserror::Error;

use crate::generator::config::clash::{load_base_config, proxy_to_clash, ClashConfigStats};
use crate::generator::config::group::generate_all_groups;
use crate::generator::config::ruleconvert::{
    expand_rulesets, generate_rules_for_groups, rule_providers, rulesets_for_groups,
};
use crate::models::GroupCategory;
use crate::parser::{parse_subscription, ParseError};
use crate::rulesets::{cache_file, fetch_rulesets, RulesetCache, SystemClock};
use crate::settings::Settings;
use crate::utils::http::{build_client, web_get_with, HttpError};
use crate::utils::{file_exists, file_get, is_link};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No subscription URL provided")]
    MissingUrl,

    #[error("Subscription is neither a URL nor an existing file: {0}")]
    InvalidSource(String),

    #[error("Failed to fetch subscription: {0}")]
    Fetch(#[from] HttpError),

    #[error("Failed to parse subscription: {0}")]
    Parse(#[from] ParseError),

    #[error("No valid nodes found in subscription")]
    NoNodes,

    #[error("Failed to serialize configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration for one conversion run
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Subscription URL
    pub url: String,
    /// Requested categories, the settings' defaults apply when empty
    pub categories: Vec<GroupCategory>,
    /// Load and save the ruleset cache
    pub use_cache: bool,
    pub settings: Settings,
}

impl ConverterConfig {
    /// Categories actually used for this run
    pub fn effective_categories(&self) -> Vec<GroupCategory> {
        if self.categories.is_empty() {
            info!(
                "No groups requested, using defaults: {}",
                self.settings
                    .default_groups
                    .iter()
                    .map(|category| category.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            self.settings.default_groups.clone()
        } else {
            self.categories.clone()
        }
    }
}

/// Builder for ConverterConfig
#[derive(Debug, Clone)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl Default for ConverterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterConfigBuilder {
    pub fn new() -> Self {
        ConverterConfigBuilder {
            config: ConverterConfig {
                url: String::new(),
                categories: Vec::new(),
                use_cache: true,
                settings: Settings::default(),
            },
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    pub fn categories(mut self, categories: Vec<GroupCategory>) -> Self {
        self.config.categories = categories;
        self
    }

    pub fn add_category(mut self, category: GroupCategory) -> Self {
        self.config.categories.push(category);
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.config.use_cache = use_cache;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<ConverterConfig, ConvertError> {
        if self.config.url.trim().is_empty() {
            return Err(ConvertError::MissingUrl);
        }
        Ok(self.config)
    }
}

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct ConverterResult {
    /// The generated YAML document
    pub content: String,
    pub stats: ClashConfigStats,
}

/// Resolves fetched rulesets through the cache configured in `config`
async fn resolve_rulesets(
    client: &Client,
    config: &ConverterConfig,
    categories: &[GroupCategory],
) -> HashMap<String, Vec<String>> {
    let settings = &config.settings;
    let sources = rulesets_for_groups(categories, &settings.ruleset_base_url);
    info!("Resolving {} ruleset(s)", sources.len());

    if !config.use_cache {
        return fetch_rulesets::<SystemClock>(client, &sources, None).await;
    }

    let path = cache_file(&settings.cache_dir);
    let mut cache = RulesetCache::load(&path, settings.cache_expiry(), SystemClock);
    let fetched = fetch_rulesets(client, &sources, Some(&mut cache)).await;
    match cache.save(&path) {
        Ok(()) => debug!("Saved ruleset cache to {}", path.display()),
        Err(e) => warn!("Failed to save ruleset cache {}: {}", path.display(), e),
    }
    fetched
}

/// Convert an already fetched subscription body
///
/// # Arguments
/// * `content` - Subscription body
/// * `config` - Conversion options
/// * `client` - Client for ruleset downloads, unused in rule provider mode
pub async fn convert_content(
    content: &str,
    config: &ConverterConfig,
    client: &Client,
) -> Result<ConverterResult, ConvertError> {
    let settings = &config.settings;

    let nodes = parse_subscription(content, &settings.parse_settings())?;
    if nodes.is_empty() {
        return Err(ConvertError::NoNodes);
    }

    let categories = config.effective_categories();
    let node_names: Vec<String> = nodes.iter().map(|node| node.name.clone()).collect();
    let groups = generate_all_groups(&node_names, &categories);
    let rules = generate_rules_for_groups(&categories);

    let (rules, providers) = if settings.rule_providers {
        let sources = rulesets_for_groups(&categories, &settings.ruleset_base_url);
        (rules, rule_providers(&sources))
    } else {
        let fetched = resolve_rulesets(client, config, &categories).await;
        (expand_rulesets(&rules, &fetched), BTreeMap::new())
    };

    let base = load_base_config(settings.base_config.as_deref());
    let (content, stats) = proxy_to_clash(base, &nodes, &groups, rules, providers)?;
    info!(
        "Generated config: {} proxies, {} groups, {} rule providers, {} rules",
        stats.proxies, stats.proxy_groups, stats.rule_providers, stats.rules
    );

    Ok(ConverterResult { content, stats })
}

/// Fetch the subscription in `config` and convert it
///
/// The subscription is downloaded when it is an http(s) link and read from
/// disk when it names an existing file.
pub async fn converter(config: ConverterConfig) -> Result<ConverterResult, ConvertError> {
    let client = build_client(&config.settings.http_config())?;

    let content = if is_link(&config.url) {
        info!("Fetching subscription {}", config.url);
        web_get_with(&client, &config.url).await?
    } else if file_exists(&config.url) {
        info!("Reading subscription file {}", config.url);
        file_get(&config.url)?
    } else {
        return Err(ConvertError::InvalidSource(config.url.clone()));
    };
    debug!("Subscription body is {} bytes", content.len());

    convert_content(&content, &config, &client).await
}

/// Runs [`converter`] to completion on a fresh single threaded runtime
pub fn converter_blocking(config: ConverterConfig) -> Result<ConverterResult, ConvertError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(converter(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_url() {
        assert!(matches!(
            ConverterConfigBuilder::new().build(),
            Err(ConvertError::MissingUrl)
        ));

        let config = ConverterConfigBuilder::new()
            .url("https://sub.example.com/link")
            .add_category(GroupCategory::Gaming)
            .use_cache(false)
            .build()
            .unwrap();
        assert_eq!(config.categories, [GroupCategory::Gaming]);
        assert!(!config.use_cache);
    }

    #[test]
    fn test_effective_categories_default() {
        let config = ConverterConfigBuilder::new().url("u").build().unwrap();
        assert_eq!(
            config.effective_categories(),
            Settings::default().default_groups
        );
    }
}
