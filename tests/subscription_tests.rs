use clash_converter::generator::config::single::{proxy_to_single, proxy_to_uri};
use clash_converter::parser::explodes::explode;
use clash_converter::parser::{
    classify_content, parse_subscription, ParseError, ParseSettings, SubscriptionContent,
};
use clash_converter::utils::base64::base64_encode;
use clash_converter::{Proxy, ProxyKind};

#[cfg(test)]
mod subscription_tests {
    use std::collections::BTreeMap;

    use super::*;

    fn subscription(links: &[&str]) -> String {
        base64_encode(&links.join("\n"))
    }

    #[test]
    fn test_scenario_a_legacy_ss() {
        let link = format!("ss://{}#MyNode", base64_encode("aes-256-gcm:pw@1.2.3.4:8388"));
        let node = explode(&link, &ParseSettings::default()).unwrap();
        assert_eq!(
            node,
            Proxy::ss_construct("MyNode", "1.2.3.4", 8388, "aes-256-gcm", "pw")
        );
    }

    #[test]
    fn test_scenario_b_vmess_websocket() {
        let json = r#"{"ps":"N1","add":"h.com","port":"443","id":"u-1","aid":"0","net":"ws","path":"/p","host":"h.com","tls":"tls"}"#;
        let node = explode(&format!("vmess://{}", base64_encode(json)), &ParseSettings::default())
            .unwrap();
        match node.kind {
            ProxyKind::VMess {
                tls,
                ws_path,
                ws_headers,
                ..
            } => {
                assert!(tls);
                assert_eq!(ws_path.as_deref(), Some("/p"));
                assert_eq!(
                    ws_headers,
                    Some(BTreeMap::from([("Host".to_string(), "h.com".to_string())]))
                );
            }
            other => panic!("expected vmess, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_c_malformed_line_is_skipped() {
        let good = format!("ss://{}#Good", base64_encode("aes-256-gcm:pw@1.2.3.4:8388"));
        let content = subscription(&[&good, "ss://!!!invalid!!!"]);

        let nodes = parse_subscription(&content, &ParseSettings::default()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "Good");
    }

    #[test]
    fn test_scenario_d_native_marker_wins() {
        let links = subscription(&["trojan://pw@t.example.com:443#T"]);
        let content = format!("proxies:\n{}", links);
        assert_eq!(classify_content(&content), SubscriptionContent::NativeConfig);
    }

    #[test]
    fn test_scenario_e_trojan_without_at() {
        let content = subscription(&["trojan://t.example.com:443#NoPassword"]);
        let nodes = parse_subscription(&content, &ParseSettings::default()).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_mixed_list_keeps_order() {
        let ssr_body = format!(
            "ssr.example.com:443:origin:aes-256-cfb:plain:{}/?remarks={}",
            base64_encode("pw"),
            base64_encode("SSR 1")
        );
        let vmess_json = r#"{"ps":"VM 1","add":"v.example.com","port":443,"id":"u","aid":0,"net":"tcp"}"#;
        let links = [
            format!("vmess://{}", base64_encode(vmess_json)),
            "vless://u@x.example.com:443#unsupported".to_string(),
            format!("ssr://{}", base64_encode(&ssr_body)),
            "trojan://pw@t.example.com:notaport#bad".to_string(),
            format!("ss://{}@1.2.3.4:8388#SS 1", base64_encode("aes-128-gcm:pw")),
            "trojan://pw@t.example.com:443#Trojan 1".to_string(),
        ];
        let refs: Vec<&str> = links.iter().map(String::as_str).collect();

        let nodes = parse_subscription(&subscription(&refs), &ParseSettings::default()).unwrap();
        let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["VM 1", "SSR 1", "SS 1", "Trojan 1"]);
    }

    #[test]
    fn test_unrecognized_content() {
        for content in ["", "   ", "<html></html>", "port: 7890\nmode: rule"] {
            assert_eq!(
                parse_subscription(content, &ParseSettings::default()),
                Err(ParseError::UnsupportedFormat),
                "{:?}",
                content
            );
        }
    }

    #[test]
    fn test_ports_are_always_positive() {
        let links = [
            "trojan://pw@a.example:0#zero",
            "trojan://pw@a.example:70000#overflow",
            "trojan://pw@a.example:-1#negative",
            "trojan://pw@a.example:443#ok",
        ];
        let nodes = parse_subscription(&subscription(&links), &ParseSettings::default()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes.iter().all(|n| n.port > 0));
    }

    #[test]
    fn test_encoded_links_decode_back() {
        let nodes = vec![
            Proxy::ss_construct("SS 香港", "1.2.3.4", 8388, "chacha20-ietf-poly1305", "p@ss:word"),
            Proxy::ssr_construct(
                "SSR 日本",
                "ssr.example.com",
                8443,
                "auth_aes128_md5",
                "aes-256-cfb",
                "tls1.2_ticket_auth",
                "secret",
                "cdn.example.com",
                "1024:key",
            ),
            Proxy::vmess_construct(
                "VMess WS",
                "v.example.com",
                443,
                "b831381d-6324-4d53-ad4f-8cda48b30811",
                0,
                "auto",
                "ws",
                "/ray",
                "cdn.example.com",
                true,
            ),
            Proxy::vmess_construct(
                "VMess TCP",
                "v2.example.com",
                10086,
                "b831381d-6324-4d53-ad4f-8cda48b30811",
                64,
                "aes-128-gcm",
                "tcp",
                "",
                "",
                false,
            ),
            Proxy::trojan_construct("Trojan", "t.example.com", 443, "pw", "sni.example.com", true),
            Proxy::trojan_construct("Trojan 特殊", "t2.example.com", 8443, "p#w@ss word", "", false),
        ];

        for node in &nodes {
            let decoded = explode(&proxy_to_uri(node), &ParseSettings::strict()).unwrap();
            assert_eq!(&decoded, node);
        }

        let content = base64_encode(&proxy_to_single(&nodes));
        let parsed = parse_subscription(&content, &ParseSettings::default()).unwrap();
        assert_eq!(parsed, nodes);
    }
}
