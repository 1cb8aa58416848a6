use std::collections::BTreeMap;

use super::proxy::{Proxy, ProxyKind};

impl Proxy {
    pub fn ss_construct(name: &str, server: &str, port: u16, cipher: &str, password: &str) -> Self {
        Proxy {
            name: name.to_string(),
            server: server.to_string(),
            port,
            kind: ProxyKind::Shadowsocks {
                cipher: cipher.to_string(),
                password: password.to_string(),
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ssr_construct(
        name: &str,
        server: &str,
        port: u16,
        protocol: &str,
        cipher: &str,
        obfs: &str,
        password: &str,
        obfs_param: &str,
        protocol_param: &str,
    ) -> Self {
        Proxy {
            name: name.to_string(),
            server: server.to_string(),
            port,
            kind: ProxyKind::ShadowsocksR {
                cipher: cipher.to_string(),
                password: password.to_string(),
                protocol: protocol.to_string(),
                protocol_param: protocol_param.to_string(),
                obfs: obfs.to_string(),
                obfs_param: obfs_param.to_string(),
            },
        }
    }

    /// Builds a VMess node. `path` and `host` are only kept for websocket transport.
    #[allow(clippy::too_many_arguments)]
    pub fn vmess_construct(
        name: &str,
        server: &str,
        port: u16,
        uuid: &str,
        alter_id: u32,
        cipher: &str,
        network: &str,
        path: &str,
        host: &str,
        tls: bool,
    ) -> Self {
        let (ws_path, ws_headers) = if network == "ws" {
            let headers = if host.is_empty() {
                None
            } else {
                Some(BTreeMap::from([("Host".to_string(), host.to_string())]))
            };
            (Some(path.to_string()), headers)
        } else {
            (None, None)
        };

        Proxy {
            name: name.to_string(),
            server: server.to_string(),
            port,
            kind: ProxyKind::VMess {
                uuid: uuid.to_string(),
                alter_id,
                cipher: if cipher.is_empty() {
                    "auto".to_string()
                } else {
                    cipher.to_string()
                },
                tls,
                network: network.to_string(),
                ws_path,
                ws_headers,
            },
        }
    }

    pub fn trojan_construct(
        name: &str,
        server: &str,
        port: u16,
        password: &str,
        sni: &str,
        skip_cert_verify: bool,
    ) -> Self {
        Proxy {
            name: name.to_string(),
            server: server.to_string(),
            port,
            kind: ProxyKind::Trojan {
                password: password.to_string(),
                sni: sni.to_string(),
                skip_cert_verify,
            },
        }
    }
}
