use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Proxy, ProxyGroupConfig, ProxyGroupType};

fn is_empty_option_string(s: &Option<String>) -> bool {
    s.as_deref().map_or(true, str::is_empty)
}

/// Represents a complete Clash configuration output
///
/// Keys the struct does not model are kept in `extra_options`, so a template
/// survives a load and re-serialize unchanged apart from the generated sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashYamlOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socks_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_lan: Option<bool>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub external_controller: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<ClashDns>,

    #[serde(flatten)]
    pub extra_options: BTreeMap<String, serde_yaml::Value>,

    #[serde(default)]
    pub proxies: Vec<Proxy>,
    #[serde(default)]
    pub proxy_groups: Vec<ClashProxyGroup>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rule_providers: BTreeMap<String, RuleProvider>,
    #[serde(default)]
    pub rules: Vec<String>,
}

/// DNS configuration for Clash
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_nameserver: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub enhanced_mode: Option<String>,
    #[serde(skip_serializing_if = "is_empty_option_string")]
    pub fake_ip_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_hosts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameserver: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_filter: Option<ClashDnsFallbackFilter>,
    #[serde(flatten)]
    pub extra_options: BTreeMap<String, serde_yaml::Value>,
}

/// DNS fallback filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashDnsFallbackFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipcidr: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra_options: BTreeMap<String, serde_yaml::Value>,
}

/// Represents a proxy group in Clash configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClashProxyGroup {
    #[serde(rename = "select")]
    Select { name: String, proxies: Vec<String> },
    #[serde(rename = "url-test")]
    UrlTest {
        name: String,
        proxies: Vec<String>,
        url: String,
        interval: u32,
    },
    #[serde(rename = "fallback")]
    Fallback {
        name: String,
        proxies: Vec<String>,
        url: String,
        interval: u32,
    },
    #[serde(rename = "load-balance")]
    LoadBalance {
        name: String,
        proxies: Vec<String>,
        strategy: String,
        url: String,
        interval: u32,
    },
}

impl ClashProxyGroup {
    pub fn name(&self) -> &str {
        match self {
            ClashProxyGroup::Select { name, .. }
            | ClashProxyGroup::UrlTest { name, .. }
            | ClashProxyGroup::Fallback { name, .. }
            | ClashProxyGroup::LoadBalance { name, .. } => name,
        }
    }
}

impl From<&ProxyGroupConfig> for ClashProxyGroup {
    fn from(group: &ProxyGroupConfig) -> Self {
        let name = group.name.clone();
        let proxies = group.proxies.clone();
        match group.group_type {
            ProxyGroupType::Select => ClashProxyGroup::Select { name, proxies },
            ProxyGroupType::URLTest => ClashProxyGroup::UrlTest {
                name,
                proxies,
                url: group.url.clone(),
                interval: group.interval,
            },
            ProxyGroupType::Fallback => ClashProxyGroup::Fallback {
                name,
                proxies,
                url: group.url.clone(),
                interval: group.interval,
            },
            ProxyGroupType::LoadBalance => ClashProxyGroup::LoadBalance {
                name,
                proxies,
                strategy: group.strategy_str().to_string(),
                url: group.url.clone(),
                interval: group.interval,
            },
        }
    }
}

/// Entry of the `rule-providers` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: String,
    pub url: String,
    pub path: String,
    pub interval: u32,
}

impl ClashYamlOutput {
    /// The configuration used when no template is given
    pub fn default_base() -> Self {
        ClashYamlOutput {
            port: Some(7890),
            socks_port: Some(7891),
            allow_lan: Some(false),
            mode: Some("rule".to_string()),
            log_level: Some("info".to_string()),
            external_controller: Some("127.0.0.1:9090".to_string()),
            dns: Some(ClashDns::default_fake_ip()),
            ..Default::default()
        }
    }
}

impl ClashDns {
    fn default_fake_ip() -> Self {
        let list = |items: &[&str]| -> Option<Vec<String>> {
            Some(items.iter().map(|s| s.to_string()).collect())
        };
        ClashDns {
            enable: Some(true),
            ipv6: Some(false),
            default_nameserver: list(&["223.5.5.5", "119.29.29.29"]),
            enhanced_mode: Some("fake-ip".to_string()),
            fake_ip_range: Some("198.18.0.1/16".to_string()),
            use_hosts: Some(true),
            nameserver: list(&["https://doh.pub/dns-query", "https://dns.alidns.com/dns-query"]),
            fallback: list(&[
                "https://doh.dns.sb/dns-query",
                "https://dns.cloudflare.com/dns-query",
                "https://dns.twnic.tw/dns-query",
                "tls://8.8.4.4:853",
            ]),
            fallback_filter: Some(ClashDnsFallbackFilter {
                geoip: Some(true),
                ipcidr: list(&["240.0.0.0/4", "0.0.0.0/32"]),
                extra_options: BTreeMap::new(),
            }),
            extra_options: BTreeMap::new(),
        }
    }
}

impl Default for ClashYamlOutput {
    fn default() -> Self {
        Self {
            port: None,
            socks_port: None,
            allow_lan: None,
            mode: Some("rule".to_string()),
            log_level: Some("info".to_string()),
            external_controller: None,
            dns: None,
            extra_options: BTreeMap::new(),
            proxies: Vec::new(),
            proxy_groups: Vec::new(),
            rule_providers: BTreeMap::new(),
            rules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BalanceStrategy;

    #[test]
    fn test_group_conversion() {
        let config = ProxyGroupConfig::new(
            "LB",
            ProxyGroupType::LoadBalance,
            vec!["a".to_string()],
        )
        .with_health_check("http://www.gstatic.com/generate_204", 300)
        .with_strategy(BalanceStrategy::RoundRobin);

        let group = ClashProxyGroup::from(&config);
        assert_eq!(group.name(), "LB");

        let yaml = serde_yaml::to_string(&group).unwrap();
        assert!(yaml.contains("type: load-balance"));
        assert!(yaml.contains("strategy: round-robin"));
        assert!(yaml.contains("interval: 300"));
    }

    #[test]
    fn test_default_base_keys() {
        let yaml = serde_yaml::to_string(&ClashYamlOutput::default_base()).unwrap();
        for key in [
            "port: 7890",
            "socks-port: 7891",
            "allow-lan: false",
            "mode: rule",
            "log-level: info",
            "external-controller: 127.0.0.1:9090",
            "enhanced-mode: fake-ip",
            "fallback-filter:",
        ] {
            assert!(yaml.contains(key), "missing {:?} in\n{}", key, yaml);
        }
        assert!(!yaml.contains("rule-providers"));
    }
}
