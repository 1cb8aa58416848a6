//! Proxy model definitions
//!
//! Contains the canonical node record every link decoder produces. The record is
//! serialized as-is into the `proxies` section of a Clash configuration, so the
//! serde field names here are the Clash field names.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Represents the type of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    Shadowsocks,
    ShadowsocksR,
    VMess,
    Trojan,
}

impl ProxyType {
    /// Link scheme prefix, including the `://` separator
    pub fn scheme(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "ss://",
            ProxyType::ShadowsocksR => "ssr://",
            ProxyType::VMess => "vmess://",
            ProxyType::Trojan => "trojan://",
        }
    }

    /// Display name used when a link carries no name of its own
    pub fn default_name(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "SS Node",
            ProxyType::ShadowsocksR => "SSR Node",
            ProxyType::VMess => "VMess Node",
            ProxyType::Trojan => "Trojan Node",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "SS",
            ProxyType::ShadowsocksR => "SSR",
            ProxyType::VMess => "VMess",
            ProxyType::Trojan => "Trojan",
        }
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_vmess_cipher() -> String {
    "auto".to_string()
}

/// Variant specific connection parameters, tagged by Clash `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProxyKind {
    #[serde(rename = "ss")]
    Shadowsocks {
        // Empty only on placeholder records from shallow native extraction
        #[serde(default, skip_serializing_if = "String::is_empty")]
        cipher: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        password: String,
    },
    #[serde(rename = "ssr")]
    ShadowsocksR {
        cipher: String,
        password: String,
        #[serde(default)]
        protocol: String,
        #[serde(rename = "protocol-param", default)]
        protocol_param: String,
        #[serde(default)]
        obfs: String,
        #[serde(rename = "obfs-param", default)]
        obfs_param: String,
    },
    #[serde(rename = "vmess")]
    VMess {
        uuid: String,
        #[serde(rename = "alterId", default)]
        alter_id: u32,
        #[serde(default = "default_vmess_cipher")]
        cipher: String,
        #[serde(default)]
        tls: bool,
        #[serde(default)]
        network: String,
        #[serde(rename = "ws-path", default, skip_serializing_if = "Option::is_none")]
        ws_path: Option<String>,
        #[serde(rename = "ws-headers", default, skip_serializing_if = "Option::is_none")]
        ws_headers: Option<BTreeMap<String, String>>,
    },
    #[serde(rename = "trojan")]
    Trojan {
        password: String,
        #[serde(default)]
        sni: String,
        #[serde(rename = "skip-cert-verify", default)]
        skip_cert_verify: bool,
    },
}

impl ProxyKind {
    pub fn proxy_type(&self) -> ProxyType {
        match self {
            ProxyKind::Shadowsocks { .. } => ProxyType::Shadowsocks,
            ProxyKind::ShadowsocksR { .. } => ProxyType::ShadowsocksR,
            ProxyKind::VMess { .. } => ProxyType::VMess,
            ProxyKind::Trojan { .. } => ProxyType::Trojan,
        }
    }
}

/// Reads a port written either as a number or as text, e.g. `port: "8388"`
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    struct PortVisitor;

    impl<'de> Visitor<'de> for PortVisitor {
        type Value = u16;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a port number or numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u16::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u16::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }
    }

    deserializer.deserialize_any(PortVisitor)
}

/// Represents a proxy node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proxy {
    pub name: String,
    pub server: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(flatten)]
    pub kind: ProxyKind,
}

impl Proxy {
    pub fn proxy_type(&self) -> ProxyType {
        self.kind.proxy_type()
    }

    /// Whether every field required by this node's type is populated
    pub fn is_complete(&self) -> bool {
        if self.server.is_empty() || self.port == 0 {
            return false;
        }
        match &self.kind {
            ProxyKind::Shadowsocks { cipher, password } => {
                !cipher.is_empty() && !password.is_empty()
            }
            ProxyKind::ShadowsocksR {
                cipher, password, ..
            } => !cipher.is_empty() && !password.is_empty(),
            ProxyKind::VMess { uuid, .. } => !uuid.is_empty(),
            ProxyKind::Trojan { password, .. } => !password.is_empty(),
        }
    }
}
