use url::Url;

use crate::models::{Proxy, ProxyType};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::types::DecodeError;
use crate::utils::url::url_decode;

use super::common::strip_scheme;

/// Parse a Trojan link into a Proxy object
///
/// Format: `trojan://password@server:port[/path][?sni=..&allowInsecure=1][#name]`.
/// The password and name are percent-decoded.
pub fn explode_trojan(trojan: &str, _settings: &ParseSettings) -> Result<Proxy, DecodeError> {
    strip_scheme(trojan, ProxyType::Trojan.scheme())?;
    let url = Url::parse(trojan)?;

    let password = url_decode(url.username());
    if password.is_empty() {
        return Err(DecodeError::MissingDelimiter {
            field: "trojan link",
            delimiter: '@',
        });
    }

    let server = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(DecodeError::MissingField("server")),
    };
    let port = match url.port() {
        Some(0) => return Err(DecodeError::InvalidPort("0".to_string())),
        Some(port) => port,
        None => return Err(DecodeError::MissingField("port")),
    };

    let mut sni = String::new();
    let mut skip_cert_verify = false;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "sni" => sni = value.into_owned(),
            "allowInsecure" => skip_cert_verify = value == "1",
            _ => {}
        }
    }

    let name = url
        .fragment()
        .map(url_decode)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ProxyType::Trojan.default_name().to_string());

    Ok(Proxy::trojan_construct(
        &name,
        server,
        port,
        &password,
        &sni,
        skip_cert_verify,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyKind;

    fn decode(link: &str) -> Result<Proxy, DecodeError> {
        explode_trojan(link, &ParseSettings::default())
    }

    #[test]
    fn test_full_link() {
        let node =
            decode("trojan://p%40ss@t.example.com:443/ws?sni=cdn.example.com&allowInsecure=1#JP%2001")
                .unwrap();
        assert_eq!(node.name, "JP 01");
        assert_eq!(node.server, "t.example.com");
        assert_eq!(node.port, 443);
        assert_eq!(
            node.kind,
            ProxyKind::Trojan {
                password: "p@ss".to_string(),
                sni: "cdn.example.com".to_string(),
                skip_cert_verify: true,
            }
        );
    }

    #[test]
    fn test_query_values_are_decoded() {
        let node = decode("trojan://pw@t.example.com:443?sni=cdn%2Eexample.com#x").unwrap();
        match node.kind {
            ProxyKind::Trojan { sni, .. } => assert_eq!(sni, "cdn.example.com"),
            other => panic!("expected trojan, got {:?}", other),
        }
    }

    #[test]
    fn test_escaped_password() {
        let node = decode("trojan://p%23w%40rd%20x@t.example.com:443#T").unwrap();
        assert_eq!(node.name, "T");
        match node.kind {
            ProxyKind::Trojan { password, .. } => assert_eq!(password, "p#w@rd x"),
            other => panic!("expected trojan, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let node = decode("trojan://pw@1.2.3.4:8443?allowInsecure=true").unwrap();
        assert_eq!(node.name, "Trojan Node");
        assert_eq!(
            node.kind,
            ProxyKind::Trojan {
                password: "pw".to_string(),
                sni: String::new(),
                skip_cert_verify: false,
            }
        );
    }

    #[test]
    fn test_missing_at_sign() {
        assert!(matches!(
            decode("trojan://t.example.com:443#x"),
            Err(DecodeError::MissingDelimiter { delimiter: '@', .. })
        ));
    }

    #[test]
    fn test_missing_or_bad_port() {
        assert!(matches!(
            decode("trojan://pw@t.example.com"),
            Err(DecodeError::MissingField("port"))
        ));
        assert!(matches!(
            decode("trojan://pw@t.example.com:?sni=a"),
            Err(DecodeError::MissingField("port"))
        ));
        assert!(matches!(
            decode("trojan://pw@t.example.com:0"),
            Err(DecodeError::InvalidPort(_))
        ));
        assert!(matches!(
            decode("trojan://pw@t.example.com:70000"),
            Err(DecodeError::InvalidUrl(_))
        ));
    }
}
