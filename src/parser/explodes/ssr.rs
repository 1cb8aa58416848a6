use std::collections::HashMap;

use log::warn;

use crate::models::{Proxy, ProxyType};
use crate::parser::parse_settings::ParseSettings;
use crate::parser::types::DecodeError;
use crate::utils::base64::base64_decode;

use super::common::{parse_port, parse_query, strip_scheme};

/// Decodes an optional base64 query parameter.
///
/// A missing or empty value yields an empty string. A value that fails to decode
/// rejects the link in strict mode and is otherwise replaced by an empty string.
fn decode_param(
    params: &HashMap<String, String>,
    key: &'static str,
    settings: &ParseSettings,
) -> Result<String, DecodeError> {
    let Some(raw) = params.get(key).filter(|raw| !raw.is_empty()) else {
        return Ok(String::new());
    };
    match base64_decode(raw) {
        Some(value) => Ok(value),
        None if settings.strict => Err(DecodeError::InvalidValue {
            field: key,
            value: raw.clone(),
        }),
        None => {
            warn!("SSR parameter {} is not valid base64, ignoring it", key);
            Ok(String::new())
        }
    }
}

/// Parse a ShadowsocksR link into a Proxy object
///
/// The body is base64 of
/// `server:port:protocol:method:obfs:base64(password)/?remarks=..&obfsparam=..&protoparam=..`
/// where every query value is base64 as well.
pub fn explode_ssr(ssr: &str, settings: &ParseSettings) -> Result<Proxy, DecodeError> {
    let body = strip_scheme(ssr, ProxyType::ShadowsocksR.scheme())?;
    let decoded = base64_decode(body.trim()).ok_or(DecodeError::InvalidBase64("ssr link"))?;

    let (main, query) = decoded.split_once("/?").unwrap_or((decoded.as_str(), ""));

    let fields: Vec<&str> = main.splitn(6, ':').collect();
    let &[server, port, protocol, method, obfs, password] = fields.as_slice() else {
        return Err(DecodeError::FieldCount {
            expected: 6,
            found: fields.len(),
        });
    };

    if server.is_empty() {
        return Err(DecodeError::MissingField("server"));
    }
    let port = parse_port(port)?;
    let password =
        base64_decode(password).ok_or(DecodeError::InvalidBase64("ssr password"))?;
    if method.is_empty() {
        return Err(DecodeError::MissingField("cipher"));
    }
    if password.is_empty() {
        return Err(DecodeError::MissingField("password"));
    }

    let params = parse_query(query);
    let mut name = decode_param(&params, "remarks", settings)?;
    if name.is_empty() {
        name = ProxyType::ShadowsocksR.default_name().to_string();
    }
    let obfs_param = decode_param(&params, "obfsparam", settings)?;
    let protocol_param = decode_param(&params, "protoparam", settings)?;

    Ok(Proxy::ssr_construct(
        &name,
        server,
        port,
        protocol,
        method,
        obfs,
        &password,
        &obfs_param,
        &protocol_param,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyKind;
    use crate::utils::base64::{base64_encode, url_safe_base64_encode};

    fn ssr_link(main: &str, query: &str) -> String {
        let body = if query.is_empty() {
            main.to_string()
        } else {
            format!("{}/?{}", main, query)
        };
        format!("ssr://{}", url_safe_base64_encode(&body))
    }

    #[test]
    fn test_full_link() {
        let main = format!(
            "ssr.example.com:8443:auth_aes128_md5:aes-256-cfb:tls1.2_ticket_auth:{}",
            url_safe_base64_encode("secret")
        );
        let query = format!(
            "obfsparam={}&protoparam={}&remarks={}",
            url_safe_base64_encode("cdn.example.com"),
            url_safe_base64_encode("1024:abc"),
            url_safe_base64_encode("香港 01")
        );
        let node = explode_ssr(&ssr_link(&main, &query), &ParseSettings::default()).unwrap();

        assert_eq!(node.name, "香港 01");
        assert_eq!(node.server, "ssr.example.com");
        assert_eq!(node.port, 8443);
        assert_eq!(
            node.kind,
            ProxyKind::ShadowsocksR {
                cipher: "aes-256-cfb".to_string(),
                password: "secret".to_string(),
                protocol: "auth_aes128_md5".to_string(),
                protocol_param: "1024:abc".to_string(),
                obfs: "tls1.2_ticket_auth".to_string(),
                obfs_param: "cdn.example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_without_query() {
        let main = format!("1.2.3.4:80:origin:rc4-md5:plain:{}", base64_encode("pw"));
        let node = explode_ssr(&ssr_link(&main, ""), &ParseSettings::default()).unwrap();
        assert_eq!(node.name, "SSR Node");
        match node.kind {
            ProxyKind::ShadowsocksR {
                obfs_param,
                protocol_param,
                ..
            } => {
                assert!(obfs_param.is_empty());
                assert!(protocol_param.is_empty());
            }
            other => panic!("expected ssr, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let link = ssr_link("1.2.3.4:80:origin:rc4-md5", "");
        assert!(matches!(
            explode_ssr(&link, &ParseSettings::default()),
            Err(DecodeError::FieldCount {
                expected: 6,
                found: 4
            })
        ));
    }

    #[test]
    fn test_bad_remarks_lenient_and_strict() {
        let main = format!("1.2.3.4:80:origin:rc4-md5:plain:{}", base64_encode("pw"));
        let link = ssr_link(&main, "remarks=!!!");

        let node = explode_ssr(&link, &ParseSettings::default()).unwrap();
        assert_eq!(node.name, "SSR Node");

        assert!(matches!(
            explode_ssr(&link, &ParseSettings::strict()),
            Err(DecodeError::InvalidValue {
                field: "remarks",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_port() {
        let main = format!("1.2.3.4:0:origin:rc4-md5:plain:{}", base64_encode("pw"));
        assert!(matches!(
            explode_ssr(&ssr_link(&main, ""), &ParseSettings::default()),
            Err(DecodeError::InvalidPort(_))
        ));
    }
}
