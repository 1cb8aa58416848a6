use std::collections::HashMap;

use crate::models::Proxy;
use crate::parser::parse_settings::ParseSettings;
use crate::parser::types::DecodeError;
use crate::utils::url::url_decode;

/// A decoder turning one link of its scheme into a node
pub type LinkDecoder = fn(&str, &ParseSettings) -> Result<Proxy, DecodeError>;

/// Scheme prefixes and their decoders
pub const LINK_DECODERS: &[(&str, LinkDecoder)] = &[
    ("vmess://", super::vmess::explode_vmess),
    ("ssr://", super::ssr::explode_ssr),
    ("ss://", super::ss::explode_ss),
    ("trojan://", super::trojan::explode_trojan),
];

/// Finds the decoder registered for the scheme of `link`
pub fn find_decoder(link: &str) -> Option<LinkDecoder> {
    LINK_DECODERS
        .iter()
        .find(|(prefix, _)| link.starts_with(prefix))
        .map(|(_, decoder)| *decoder)
}

/// Explode a proxy link into a Proxy object
///
/// Detects the link scheme and dispatches to the matching decoder.
///
/// # Arguments
/// * `link` - A single proxy link, surrounding whitespace is ignored
/// * `settings` - Parse settings forwarded to the decoder
pub fn explode(link: &str, settings: &ParseSettings) -> Result<Proxy, DecodeError> {
    let link = link.trim();
    let decoder = find_decoder(link).ok_or_else(|| {
        let scheme = link.split("://").next().unwrap_or(link);
        DecodeError::UnsupportedScheme(scheme.to_string())
    })?;
    decoder(link, settings)
}

/// Removes `prefix` from the start of `link`
pub(crate) fn strip_scheme<'a>(link: &'a str, prefix: &str) -> Result<&'a str, DecodeError> {
    link.strip_prefix(prefix)
        .ok_or_else(|| DecodeError::UnsupportedScheme(link.to_string()))
}

/// Splits off a trailing `#fragment`, returning the body and the URL-decoded
/// fragment. An empty fragment counts as absent.
pub(crate) fn split_fragment(body: &str) -> (&str, Option<String>) {
    match body.split_once('#') {
        Some((rest, fragment)) => {
            let name = url_decode(fragment);
            (rest, (!name.is_empty()).then_some(name))
        }
        None => (body, None),
    }
}

/// Parses a port given as text. Zero and out of range values are rejected.
pub(crate) fn parse_port(text: &str) -> Result<u16, DecodeError> {
    match text.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DecodeError::InvalidPort(text.to_string())),
    }
}

/// Splits `server:port` on the first `:`
pub(crate) fn split_host_port(text: &str) -> Result<(String, u16), DecodeError> {
    let (server, port) = text.split_once(':').ok_or(DecodeError::MissingDelimiter {
        field: "server",
        delimiter: ':',
    })?;
    if server.is_empty() {
        return Err(DecodeError::MissingField("server"));
    }
    Ok((server.to_string(), parse_port(port)?))
}

/// Parses `k=v&k2=v2` into a map. Values are kept raw, so base64 payloads
/// keep their `+` characters.
pub(crate) fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
