//! Rule generation
//!
//! Category rules are produced as `RULE-SET,<name>,<group>` lines. They are then
//! either expanded inline from fetched ruleset bodies or kept as references to
//! `rule-providers` entries.

use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::constants::rulesets::BASE_RULES;
use crate::generator::yaml::clash::RuleProvider;
use crate::models::GroupCategory;
use crate::parser::ruleset::Rule;

/// Refresh interval of generated rule providers, in seconds
pub const RULE_PROVIDER_INTERVAL: u32 = 86400;

/// One remote ruleset and the group its traffic goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetSource {
    pub name: String,
    pub url: String,
    pub policy: String,
}

/// Orders categories for rule emission: adblock first, then the rest in request order
fn rule_order(categories: &[GroupCategory]) -> Vec<GroupCategory> {
    let mut ordered = Vec::with_capacity(categories.len());
    if categories.contains(&GroupCategory::Adblock) {
        ordered.push(GroupCategory::Adblock);
    }
    for &category in categories {
        if !ordered.contains(&category) {
            ordered.push(category);
        }
    }
    ordered
}

/// Lists the rulesets needed by `categories`, in rule order
///
/// # Arguments
/// * `categories` - Requested categories
/// * `base_url` - Prefix joined with each ruleset's relative path
pub fn rulesets_for_groups(categories: &[GroupCategory], base_url: &str) -> Vec<RulesetSource> {
    let base_url = base_url.trim_end_matches('/');
    rule_order(categories)
        .into_iter()
        .flat_map(|category| {
            category.rulesets().iter().map(move |(name, path)| RulesetSource {
                name: name.to_string(),
                url: format!("{}/{}", base_url, path),
                policy: category.group_name().to_string(),
            })
        })
        .collect()
}

/// Generates the rule list for `categories`, ending with the base rules
pub fn generate_rules_for_groups(categories: &[GroupCategory]) -> Vec<String> {
    rule_order(categories)
        .into_iter()
        .flat_map(|category| {
            category
                .rulesets()
                .iter()
                .map(move |(name, _)| format!("RULE-SET,{},{}", name, category.group_name()))
        })
        .chain(BASE_RULES.iter().map(|rule| rule.to_string()))
        .collect()
}

/// Replaces every `RULE-SET` reference with the rules of the fetched ruleset
///
/// References to rulesets missing from `fetched` are dropped with a warning.
/// Other rules pass through unchanged.
pub fn expand_rulesets(rules: &[String], fetched: &HashMap<String, Vec<String>>) -> Vec<String> {
    let mut expanded = Vec::new();
    for rule in rules {
        let Some(reference) = rule.strip_prefix("RULE-SET,") else {
            expanded.push(rule.clone());
            continue;
        };
        let Some((name, policy)) = reference.split_once(',') else {
            warn!("Malformed rule {:?}, skipping", rule);
            continue;
        };
        match fetched.get(name) {
            Some(lines) => expanded.extend(
                lines
                    .iter()
                    .filter_map(|line| Rule::parse(line))
                    .map(|parsed| parsed.with_policy(policy)),
            ),
            None => warn!("Ruleset {} unavailable, dropping its rules", name),
        }
    }
    expanded
}

/// Builds the `rule-providers` section for the given rulesets
pub fn rule_providers(sources: &[RulesetSource]) -> BTreeMap<String, RuleProvider> {
    sources
        .iter()
        .map(|source| {
            (
                source.name.clone(),
                RuleProvider {
                    provider_type: "http".to_string(),
                    behavior: "classical".to_string(),
                    url: source.url.clone(),
                    path: format!("./ruleset/{}.yaml", source.name),
                    interval: RULE_PROVIDER_INTERVAL,
                },
            )
        })
        .collect()
}
