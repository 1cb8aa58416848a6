//! Configuration generation
//!
//! Assembles policy groups and rules and serializes the final Clash document.

pub mod config;
pub mod yaml;

pub use config::clash::{load_base_config, proxy_to_clash, ClashConfigStats};
pub use config::group::generate_all_groups;
pub use config::ruleconvert::{expand_rulesets, generate_rules_for_groups, rulesets_for_groups};
pub use config::single::{proxy_to_single, proxy_to_uri};
