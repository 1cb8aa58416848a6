use log::{debug, info, warn};

use crate::models::Proxy;
use crate::parser::explodes::{explode_native, find_decoder};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::types::{ParseError, SubscriptionContent};
use crate::utils::base64::base64_decode;

/// Markers of a native Clash configuration
const NATIVE_MARKERS: [&str; 4] = ["proxies:", "Proxy:", "proxy-groups:", "proxy-providers:"];

/// Schemes whose presence identifies a decoded link list
const LINK_SCHEMES: [&str; 4] = ["vmess://", "ss://", "ssr://", "trojan://"];

/// Decide what kind of subscription body `content` is
///
/// Native config markers win over everything else, so a body that is both a
/// config dump and valid base64 is treated as a config.
pub fn classify_content(content: &str) -> SubscriptionContent {
    if NATIVE_MARKERS.iter().any(|marker| content.contains(marker)) {
        return SubscriptionContent::NativeConfig;
    }

    match base64_decode(content.trim()) {
        Some(decoded) if LINK_SCHEMES.iter().any(|scheme| decoded.contains(scheme)) => {
            SubscriptionContent::Base64LinkList(decoded)
        }
        _ => SubscriptionContent::Unrecognized,
    }
}

/// Explode a decoded link list into nodes
///
/// One link per line. Lines with an unknown scheme are skipped quietly, links
/// that fail to decode are skipped with a warning. Output order follows input order.
pub fn explode_sub(links: &str, settings: &ParseSettings) -> Vec<Proxy> {
    let mut nodes = Vec::new();

    for (index, line) in links.lines().map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some(decoder) = find_decoder(line) else {
            debug!("Line {}: unsupported scheme, skipping", index + 1);
            continue;
        };
        match decoder(line, settings) {
            Ok(node) => nodes.push(node),
            Err(e) => warn!("Line {}: failed to parse node: {}", index + 1, e),
        }
    }

    nodes
}

/// Parse a raw subscription body into an ordered node list
///
/// # Arguments
/// * `content` - The subscription body as fetched
/// * `settings` - Strictness and native config handling
///
/// # Returns
/// The decoded nodes, possibly empty, or [`ParseError::UnsupportedFormat`] when
/// the body is neither a native config nor a base64 link list.
pub fn parse_subscription(
    content: &str,
    settings: &ParseSettings,
) -> Result<Vec<Proxy>, ParseError> {
    let nodes = match classify_content(content) {
        SubscriptionContent::NativeConfig => {
            debug!("Subscription classified as native Clash config");
            explode_native(content, settings.native_fidelity)
        }
        SubscriptionContent::Base64LinkList(decoded) => {
            debug!("Subscription classified as base64 link list");
            explode_sub(&decoded, settings)
        }
        SubscriptionContent::Unrecognized => return Err(ParseError::UnsupportedFormat),
    };

    info!("Parsed {} node(s) from subscription", nodes.len());
    Ok(nodes)
}
