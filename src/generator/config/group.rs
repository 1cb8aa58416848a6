//! Group generation utilities
//!
//! This module builds the policy groups of the generated configuration: the
//! basic node selection groups every config carries, plus one select group per
//! requested [`GroupCategory`].

use log::debug;

use crate::constants::{
    GROUP_AUTO, GROUP_BALANCE, GROUP_FALLBACK, GROUP_FINAL, GROUP_SELECT, HEALTH_CHECK_INTERVAL,
    HEALTH_CHECK_URL, POLICY_DIRECT, POLICY_REJECT,
};
use crate::models::{
    BalanceStrategy, GroupCategory, ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType,
};

fn with_nodes(prefix: &[&str], node_names: &[String]) -> Vec<String> {
    prefix
        .iter()
        .map(|name| name.to_string())
        .chain(node_names.iter().cloned())
        .collect()
}

/// Generates the groups present in every configuration
///
/// # Arguments
/// * `node_names` - Names of all nodes, in subscription order
pub fn generate_basic_groups(node_names: &[String]) -> ProxyGroupConfigs {
    vec![
        ProxyGroupConfig::new(
            GROUP_SELECT,
            ProxyGroupType::Select,
            with_nodes(&[GROUP_AUTO, GROUP_FALLBACK, GROUP_BALANCE], node_names),
        ),
        ProxyGroupConfig::new(GROUP_AUTO, ProxyGroupType::URLTest, node_names.to_vec())
            .with_health_check(HEALTH_CHECK_URL, HEALTH_CHECK_INTERVAL),
        ProxyGroupConfig::new(GROUP_FALLBACK, ProxyGroupType::Fallback, node_names.to_vec())
            .with_health_check(HEALTH_CHECK_URL, HEALTH_CHECK_INTERVAL),
        ProxyGroupConfig::new(
            GROUP_BALANCE,
            ProxyGroupType::LoadBalance,
            node_names.to_vec(),
        )
        .with_health_check(HEALTH_CHECK_URL, HEALTH_CHECK_INTERVAL)
        .with_strategy(BalanceStrategy::ConsistentHashing),
        ProxyGroupConfig::new(
            GROUP_FINAL,
            ProxyGroupType::Select,
            vec![GROUP_SELECT.to_string(), POLICY_DIRECT.to_string()],
        ),
    ]
}

/// Generates the select group for a single category
pub fn generate_category_group(category: GroupCategory, node_names: &[String]) -> ProxyGroupConfig {
    let proxies = match category {
        GroupCategory::Streaming | GroupCategory::Social | GroupCategory::Ai => {
            with_nodes(&[GROUP_SELECT, GROUP_AUTO], node_names)
        }
        GroupCategory::Adblock => vec![POLICY_REJECT.to_string(), POLICY_DIRECT.to_string()],
        _ => with_nodes(&[GROUP_SELECT, POLICY_DIRECT], node_names),
    };
    ProxyGroupConfig::new(category.group_name(), ProxyGroupType::Select, proxies)
}

/// Generates the basic groups followed by one group per category
///
/// Categories keep the order they were requested in; repeats are emitted once.
pub fn generate_all_groups(node_names: &[String], categories: &[GroupCategory]) -> ProxyGroupConfigs {
    let mut groups = generate_basic_groups(node_names);
    let mut seen = Vec::with_capacity(categories.len());
    for &category in categories {
        if seen.contains(&category) {
            debug!("Category {} requested more than once", category);
            continue;
        }
        seen.push(category);
        groups.push(generate_category_group(category, node_names));
    }
    groups
}
