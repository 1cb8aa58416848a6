pub mod rulesets;

/// Health check target for the automatic groups
pub const HEALTH_CHECK_URL: &str = "http://www.gstatic.com/generate_204";
/// Health check interval in seconds
pub const HEALTH_CHECK_INTERVAL: u32 = 300;

pub const GROUP_SELECT: &str = "🚀 节点选择";
pub const GROUP_AUTO: &str = "♻️ 自动选择";
pub const GROUP_FALLBACK: &str = "🔯 故障转移";
pub const GROUP_BALANCE: &str = "🔮 负载均衡";
pub const GROUP_FINAL: &str = "🐟 漏网之鱼";

pub const POLICY_DIRECT: &str = "DIRECT";
pub const POLICY_REJECT: &str = "REJECT";
