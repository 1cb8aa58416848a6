use log::warn;
use serde_json::Value;

use crate::models::{Proxy, ProxyType};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::types::DecodeError;
use crate::utils::base64::base64_decode;

use super::common::{parse_port, strip_scheme};

/// Reads a JSON field that may be a string or a number as text
fn json_text(json: &Value, key: &str) -> Option<String> {
    match json.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_str<'a>(json: &'a Value, key: &str) -> &'a str {
    json.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Parses `aid`. Missing or empty is 0; anything non-numeric is 0 unless strict.
fn parse_alter_id(json: &Value, settings: &ParseSettings) -> Result<u32, DecodeError> {
    let Some(aid) = json_text(json, "aid") else {
        return Ok(0);
    };
    let aid = aid.trim();
    if aid.is_empty() {
        return Ok(0);
    }
    match aid.parse::<u32>() {
        Ok(value) => Ok(value),
        Err(_) if settings.strict => Err(DecodeError::InvalidValue {
            field: "aid",
            value: aid.to_string(),
        }),
        Err(_) => {
            warn!("VMess alterId {:?} is not a number, using 0", aid);
            Ok(0)
        }
    }
}

/// Parse a VMess link into a Proxy object
///
/// The link body is base64 encoded JSON in the v2rayN share format:
/// `{"ps", "add", "port", "id", "aid", "type", "net", "path", "host", "tls"}`.
pub fn explode_vmess(vmess: &str, settings: &ParseSettings) -> Result<Proxy, DecodeError> {
    let body = strip_scheme(vmess, ProxyType::VMess.scheme())?;
    let decoded = base64_decode(body.trim()).ok_or(DecodeError::InvalidBase64("vmess link"))?;
    let json: Value = serde_json::from_str(&decoded)?;

    let server = json_str(&json, "add");
    if server.is_empty() {
        return Err(DecodeError::MissingField("add"));
    }
    let port = json_text(&json, "port").ok_or(DecodeError::MissingField("port"))?;
    let port = parse_port(&port)?;
    let uuid = json_str(&json, "id");
    if uuid.is_empty() {
        return Err(DecodeError::MissingField("id"));
    }
    let alter_id = parse_alter_id(&json, settings)?;

    let name = match json_str(&json, "ps") {
        "" => ProxyType::VMess.default_name(),
        ps => ps,
    };
    let cipher = match json_str(&json, "type") {
        "" => "auto",
        cipher => cipher,
    };

    Ok(Proxy::vmess_construct(
        name,
        server,
        port,
        uuid,
        alter_id,
        cipher,
        json_str(&json, "net"),
        json_str(&json, "path"),
        json_str(&json, "host"),
        json_str(&json, "tls") == "tls",
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::ProxyKind;
    use crate::utils::base64::base64_encode;

    fn link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    #[test]
    fn test_websocket_tls() {
        let node = explode_vmess(
            &link(r#"{"ps":"N1","add":"h.com","port":"443","id":"u-1","aid":"0","net":"ws","path":"/p","host":"h.com","tls":"tls"}"#),
            &ParseSettings::default(),
        )
        .unwrap();

        assert_eq!(node.name, "N1");
        assert_eq!(node.server, "h.com");
        assert_eq!(node.port, 443);
        assert_eq!(
            node.kind,
            ProxyKind::VMess {
                uuid: "u-1".to_string(),
                alter_id: 0,
                cipher: "auto".to_string(),
                tls: true,
                network: "ws".to_string(),
                ws_path: Some("/p".to_string()),
                ws_headers: Some(BTreeMap::from([(
                    "Host".to_string(),
                    "h.com".to_string()
                )])),
            }
        );
    }

    #[test]
    fn test_numeric_fields_and_tcp() {
        let node = explode_vmess(
            &link(r#"{"ps":"","add":"1.1.1.1","port":10086,"id":"abc","aid":64,"type":"aes-128-gcm","net":"tcp","path":"/ignored"}"#),
            &ParseSettings::default(),
        )
        .unwrap();

        assert_eq!(node.name, "VMess Node");
        assert_eq!(node.port, 10086);
        match node.kind {
            ProxyKind::VMess {
                alter_id,
                cipher,
                tls,
                ws_path,
                ws_headers,
                ..
            } => {
                assert_eq!(alter_id, 64);
                assert_eq!(cipher, "aes-128-gcm");
                assert!(!tls);
                assert_eq!(ws_path, None);
                assert_eq!(ws_headers, None);
            }
            other => panic!("expected vmess, got {:?}", other),
        }
    }

    #[test]
    fn test_ws_without_host_has_no_headers() {
        let node = explode_vmess(
            &link(r#"{"add":"h.com","port":"80","id":"u","net":"ws","path":"/"}"#),
            &ParseSettings::default(),
        )
        .unwrap();
        match node.kind {
            ProxyKind::VMess {
                ws_path,
                ws_headers,
                ..
            } => {
                assert_eq!(ws_path.as_deref(), Some("/"));
                assert_eq!(ws_headers, None);
            }
            other => panic!("expected vmess, got {:?}", other),
        }
    }

    #[test]
    fn test_alter_id_strictness() {
        let vmess = link(r#"{"add":"h.com","port":"80","id":"u","aid":"abc"}"#);

        let node = explode_vmess(&vmess, &ParseSettings::default()).unwrap();
        assert!(matches!(node.kind, ProxyKind::VMess { alter_id: 0, .. }));

        assert!(matches!(
            explode_vmess(&vmess, &ParseSettings::strict()),
            Err(DecodeError::InvalidValue { field: "aid", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        let settings = ParseSettings::default();
        assert!(matches!(
            explode_vmess("vmess://not-json-at-all", &settings),
            Err(DecodeError::InvalidBase64(_)) | Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            explode_vmess(&link(r#"{"add":"h.com","id":"u"}"#), &settings),
            Err(DecodeError::MissingField("port"))
        ));
        assert!(matches!(
            explode_vmess(&link(r#"{"add":"h.com","port":"abc","id":"u"}"#), &settings),
            Err(DecodeError::InvalidPort(_))
        ));
        assert!(matches!(
            explode_vmess(&link(r#"{"port":"443","id":"u"}"#), &settings),
            Err(DecodeError::MissingField("add"))
        ));
    }
}
