pub mod cache;
pub mod ruleset;

pub use cache::{cache_file, Clock, RulesetCache, SystemClock};
pub use ruleset::{fetch_ruleset, fetch_rulesets};
