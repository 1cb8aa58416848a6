use serde_json::json;

use crate::models::{Proxy, ProxyKind};
use crate::utils::base64::{base64_encode, url_safe_base64_encode};
use crate::utils::url::url_encode;

/// Convert a proxy to a single share link
///
/// The output is accepted by the matching link decoder.
///
/// # Arguments
/// * `node` - Proxy node to convert
pub fn proxy_to_uri(node: &Proxy) -> String {
    match &node.kind {
        ProxyKind::Shadowsocks { cipher, password } => {
            // ss://BASE64(method:password)@server:port#remark
            format!(
                "ss://{}@{}:{}#{}",
                url_safe_base64_encode(&format!("{}:{}", cipher, password)),
                node.server,
                node.port,
                url_encode(&node.name)
            )
        }
        ProxyKind::ShadowsocksR {
            cipher,
            password,
            protocol,
            protocol_param,
            obfs,
            obfs_param,
        } => {
            let mut plain_text = format!(
                "{}:{}:{}:{}:{}:{}",
                node.server,
                node.port,
                protocol,
                cipher,
                obfs,
                url_safe_base64_encode(password)
            );

            let mut params = vec![format!("remarks={}", url_safe_base64_encode(&node.name))];
            if !protocol_param.is_empty() {
                params.push(format!("protoparam={}", url_safe_base64_encode(protocol_param)));
            }
            if !obfs_param.is_empty() {
                params.push(format!("obfsparam={}", url_safe_base64_encode(obfs_param)));
            }
            plain_text.push_str(&format!("/?{}", params.join("&")));

            format!("ssr://{}", url_safe_base64_encode(&plain_text))
        }
        ProxyKind::VMess {
            uuid,
            alter_id,
            cipher,
            tls,
            network,
            ws_path,
            ws_headers,
        } => {
            let host = ws_headers
                .as_ref()
                .and_then(|headers| headers.get("Host"))
                .cloned()
                .unwrap_or_default();
            let vmess_json = json!({
                "v": "2",
                "ps": node.name,
                "add": node.server,
                "port": node.port.to_string(),
                "id": uuid,
                "aid": alter_id.to_string(),
                "type": cipher,
                "net": network,
                "path": ws_path.clone().unwrap_or_default(),
                "host": host,
                "tls": if *tls { "tls" } else { "" },
            });
            format!("vmess://{}", base64_encode(&vmess_json.to_string()))
        }
        ProxyKind::Trojan {
            password,
            sni,
            skip_cert_verify,
        } => {
            // trojan://password@server:port?sni=sni&allowInsecure=1#remark
            let mut uri = format!(
                "trojan://{}@{}:{}",
                url_encode(password),
                node.server,
                node.port
            );

            let mut params = Vec::new();
            if !sni.is_empty() {
                params.push(format!("sni={}", url_encode(sni)));
            }
            if *skip_cert_verify {
                params.push("allowInsecure=1".to_string());
            }
            if !params.is_empty() {
                uri.push_str(&format!("?{}", params.join("&")));
            }

            uri.push_str(&format!("#{}", url_encode(&node.name)));
            uri
        }
    }
}

/// Convert proxies to a newline separated list of share links
pub fn proxy_to_single(nodes: &[Proxy]) -> String {
    let mut result = String::new();
    for node in nodes {
        result.push_str(&proxy_to_uri(node));
        result.push('\n');
    }
    result
}
