use crate::models::{Proxy, ProxyType};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::types::DecodeError;
use crate::utils::base64::base64_decode;

use super::common::{split_fragment, split_host_port, strip_scheme};

/// Parse a Shadowsocks link into a Proxy object
///
/// Accepts both the SIP002 form `ss://base64(method:password)@server:port#name`
/// and the legacy form `ss://base64(method:password@server:port)#name`. Plugin
/// query strings are ignored.
pub fn explode_ss(ss: &str, _settings: &ParseSettings) -> Result<Proxy, DecodeError> {
    let body = strip_scheme(ss, ProxyType::Shadowsocks.scheme())?;

    let (body, name) = split_fragment(body);
    let name = name.unwrap_or_else(|| ProxyType::Shadowsocks.default_name().to_string());

    // "/?plugin=..." and "?plugin=..." carry nothing we emit
    let body = body.replace("/?", "?");
    let body = body.split('?').next().unwrap_or_default();

    let (method, password, server, port) = match body.split_once('@') {
        Some((secret, server_port)) => {
            let secret =
                base64_decode(secret).ok_or(DecodeError::InvalidBase64("ss user info"))?;
            let (method, password) =
                secret
                    .split_once(':')
                    .ok_or(DecodeError::MissingDelimiter {
                        field: "ss user info",
                        delimiter: ':',
                    })?;
            let (server, port) = split_host_port(server_port)?;
            (method.to_string(), password.to_string(), server, port)
        }
        None => {
            let decoded = base64_decode(body).ok_or(DecodeError::InvalidBase64("ss link"))?;
            // Passwords may contain '@', the server part never does
            let (secret, server_port) =
                decoded
                    .rsplit_once('@')
                    .ok_or(DecodeError::MissingDelimiter {
                        field: "ss link",
                        delimiter: '@',
                    })?;
            let (method, password) =
                secret
                    .split_once(':')
                    .ok_or(DecodeError::MissingDelimiter {
                        field: "ss user info",
                        delimiter: ':',
                    })?;
            let (server, port) = split_host_port(server_port)?;
            (method.to_string(), password.to_string(), server, port)
        }
    };

    if method.is_empty() {
        return Err(DecodeError::MissingField("cipher"));
    }
    if password.is_empty() {
        return Err(DecodeError::MissingField("password"));
    }

    Ok(Proxy::ss_construct(&name, &server, port, &method, &password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyKind;
    use crate::utils::base64::{base64_encode, url_safe_base64_encode};

    fn decode(link: &str) -> Result<Proxy, DecodeError> {
        explode_ss(link, &ParseSettings::default())
    }

    fn assert_ss(node: &Proxy, cipher: &str, password: &str) {
        match &node.kind {
            ProxyKind::Shadowsocks {
                cipher: c,
                password: p,
            } => {
                assert_eq!(c, cipher);
                assert_eq!(p, password);
            }
            other => panic!("expected shadowsocks, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_link() {
        let link = format!(
            "ss://{}#MyNode",
            base64_encode("aes-256-gcm:pw@1.2.3.4:8388")
        );
        let node = decode(&link).unwrap();
        assert_eq!(node.name, "MyNode");
        assert_eq!(node.server, "1.2.3.4");
        assert_eq!(node.port, 8388);
        assert_ss(&node, "aes-256-gcm", "pw");
    }

    #[test]
    fn test_sip002_link_without_padding() {
        let link = format!(
            "ss://{}@example.com:443/?plugin=obfs-local%3Bobfs%3Dhttp#Tokyo%201",
            url_safe_base64_encode("chacha20-ietf-poly1305:p:w")
        );
        let node = decode(&link).unwrap();
        assert_eq!(node.name, "Tokyo 1");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 443);
        assert_ss(&node, "chacha20-ietf-poly1305", "p:w");
    }

    #[test]
    fn test_default_name() {
        let link = format!("ss://{}", base64_encode("rc4-md5:pw@h.example:80"));
        assert_eq!(decode(&link).unwrap().name, "SS Node");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            decode("ss://!!!invalid!!!"),
            Err(DecodeError::InvalidBase64(_))
        ));

        let no_port = format!("ss://{}", base64_encode("aes-128-gcm:pw@1.2.3.4"));
        assert!(decode(&no_port).is_err());

        let bad_port = format!("ss://{}", base64_encode("aes-128-gcm:pw@1.2.3.4:http"));
        assert!(matches!(decode(&bad_port), Err(DecodeError::InvalidPort(_))));

        let no_password = format!("ss://{}@1.2.3.4:8388", base64_encode("aes-128-gcm:"));
        assert!(matches!(
            decode(&no_password),
            Err(DecodeError::MissingField("password"))
        ));
    }
}
