use std::collections::BTreeMap;

use log::{info, warn};
use serde_yaml::Value;

use crate::generator::yaml::clash::{ClashProxyGroup, ClashYamlOutput, RuleProvider};
use crate::models::{Proxy, ProxyGroupConfig};
use crate::utils::file_get;

/// Sections a template may carry that are always replaced by generated ones
const GENERATED_KEYS: [&str; 4] = ["proxies", "proxy-groups", "rule-providers", "rules"];

/// Counts reported after generating a configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClashConfigStats {
    pub proxies: usize,
    pub proxy_groups: usize,
    pub rule_providers: usize,
    pub rules: usize,
}

/// Loads the base document the generated sections are added to
///
/// Reads the YAML template at `template` when given. A template that is missing
/// or unreadable is reported and the built-in defaults are used instead.
pub fn load_base_config(template: Option<&str>) -> ClashYamlOutput {
    let Some(path) = template.filter(|p| !p.is_empty()) else {
        return ClashYamlOutput::default_base();
    };

    let parsed = file_get(path)
        .map_err(|e| e.to_string())
        .and_then(|content| parse_base_config(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(base) => {
            info!("Using base config template {}", path);
            base
        }
        Err(e) => {
            warn!("Failed to load base config {}: {}, using defaults", path, e);
            ClashYamlOutput::default_base()
        }
    }
}

/// Parses a template, dropping the sections that are generated
pub fn parse_base_config(content: &str) -> Result<ClashYamlOutput, serde_yaml::Error> {
    let mut value: Value = serde_yaml::from_str(content)?;
    if let Value::Mapping(map) = &mut value {
        for key in GENERATED_KEYS {
            map.remove(key);
        }
    }
    serde_yaml::from_value(value)
}

/// Generate a Clash configuration
///
/// # Arguments
/// * `base` - Base document, see [`load_base_config`]
/// * `nodes` - Nodes for the `proxies` section, emitted in order
/// * `groups` - Policy groups
/// * `rules` - Final rule list
/// * `rule_providers` - Emitted only when non-empty
///
/// # Returns
/// The YAML document and its summary counts
pub fn proxy_to_clash(
    mut base: ClashYamlOutput,
    nodes: &[Proxy],
    groups: &[ProxyGroupConfig],
    rules: Vec<String>,
    rule_providers: BTreeMap<String, RuleProvider>,
) -> Result<(String, ClashConfigStats), serde_yaml::Error> {
    base.proxies = nodes.to_vec();
    base.proxy_groups = groups.iter().map(ClashProxyGroup::from).collect();
    base.rule_providers = rule_providers;
    base.rules = rules;

    let stats = ClashConfigStats {
        proxies: base.proxies.len(),
        proxy_groups: base.proxy_groups.len(),
        rule_providers: base.rule_providers.len(),
        rules: base.rules.len(),
    };

    let yaml = serde_yaml::to_string(&base)?;
    Ok((yaml, stats))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::ProxyGroupType;

    #[test]
    fn test_parse_base_config_keeps_unknown_keys() {
        let template = r#"
mixed-port: 7893
mode: global
tun:
  enable: true
proxies:
  - {name: stale, type: ss, server: s, port: 1, cipher: c, password: p}
rules:
  - MATCH,DIRECT
"#;
        let base = parse_base_config(template).unwrap();
        assert_eq!(base.mode.as_deref(), Some("global"));
        assert!(base.proxies.is_empty());
        assert!(base.rules.is_empty());
        assert!(base.extra_options.contains_key("mixed-port"));
        assert!(base.extra_options.contains_key("tun"));
        assert!(base.dns.is_none());
    }

    #[test]
    fn test_load_base_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 7000\nlog-level: debug").unwrap();

        let base = load_base_config(file.path().to_str());
        assert_eq!(base.port, Some(7000));
        assert_eq!(base.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_load_base_config_falls_back() {
        let base = load_base_config(Some("/nonexistent/base.yaml"));
        assert_eq!(base.port, Some(7890));
        assert!(base.dns.is_some());
        assert_eq!(load_base_config(None).socks_port, Some(7891));
    }

    #[test]
    fn test_section_order() {
        let nodes = vec![Proxy::trojan_construct("T", "t.example.com", 443, "pw", "", true)];
        let groups = vec![ProxyGroupConfig::new(
            "G",
            ProxyGroupType::Select,
            vec!["T".to_string()],
        )];
        let (yaml, stats) = proxy_to_clash(
            ClashYamlOutput::default_base(),
            &nodes,
            &groups,
            vec!["MATCH,G".to_string()],
            BTreeMap::new(),
        )
        .unwrap();

        let position = |key: &str| yaml.find(key).unwrap();
        assert!(yaml.starts_with("port: 7890"));
        assert!(position("\ndns:") < position("\nproxies:"));
        assert!(position("\nproxies:") < position("\nproxy-groups:"));
        assert!(position("\nproxy-groups:") < position("\nrules:"));
        assert!(yaml.contains("skip-cert-verify: true"));
        assert_eq!(
            stats,
            ClashConfigStats {
                proxies: 1,
                proxy_groups: 1,
                rule_providers: 0,
                rules: 1,
            }
        );
    }
}
