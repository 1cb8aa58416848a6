use log::{debug, info, warn};
use serde_yaml::Value;

use crate::models::Proxy;
use crate::parser::parse_settings::NativeFidelity;

/// Extract nodes from a native Clash configuration
///
/// Never fails: entries that cannot be read are skipped.
///
/// # Arguments
/// * `content` - The raw configuration text
/// * `fidelity` - [`NativeFidelity::Shallow`] yields placeholder nodes,
///   [`NativeFidelity::Full`] reads the real entries
pub fn explode_native(content: &str, fidelity: NativeFidelity) -> Vec<Proxy> {
    match fidelity {
        NativeFidelity::Shallow => explode_native_shallow(content),
        NativeFidelity::Full => explode_native_full(content),
    }
}

/// Line scan over the node list section.
///
/// Each entry line mentioning both `name:` and `server:` becomes the same
/// placeholder node, the entry's own values are not read.
fn explode_native_shallow(content: &str) -> Vec<Proxy> {
    let mut nodes = Vec::new();
    let mut in_proxies = false;

    for line in content.lines().map(str::trim) {
        if line.starts_with("proxies:") || line.starts_with("Proxy:") {
            in_proxies = true;
            continue;
        }
        if line.starts_with("proxy-groups:") || line.starts_with("rules:") {
            in_proxies = false;
            continue;
        }

        if in_proxies {
            if let Some(entry) = line.strip_prefix("- ") {
                if entry.contains("name:") && entry.contains("server:") {
                    nodes.push(Proxy::ss_construct("Proxy Node", "127.0.0.1", 1080, "", ""));
                }
            }
        }
    }

    info!(
        "Native config read in shallow mode: {} placeholder node(s), set native_fidelity to full to import the real entries",
        nodes.len()
    );
    nodes
}

fn explode_native_full(content: &str) -> Vec<Proxy> {
    let yaml: Value = match serde_yaml::from_str(content) {
        Ok(yaml) => yaml,
        Err(e) => {
            warn!("Native config is not valid YAML: {}", e);
            return Vec::new();
        }
    };

    let entries = match yaml.get("proxies").or_else(|| yaml.get("Proxy")) {
        Some(Value::Sequence(seq)) => seq,
        _ => {
            debug!("Native config has no proxies list");
            return Vec::new();
        }
    };

    let mut nodes = Vec::with_capacity(entries.len());
    for entry in entries {
        let label = entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>");
        match serde_yaml::from_value::<Proxy>(entry.clone()) {
            Ok(node) if node.is_complete() => nodes.push(node),
            Ok(_) => warn!("Skipping native entry {}: missing required fields", label),
            Err(e) => warn!("Skipping native entry {}: {}", label, e),
        }
    }
    nodes
}
