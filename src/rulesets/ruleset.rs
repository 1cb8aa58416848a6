use std::collections::HashMap;

use futures::future::join_all;
use log::{info, warn};
use reqwest::Client;

use crate::generator::config::ruleconvert::RulesetSource;
use crate::parser::ruleset::parse_ruleset_payload;
use crate::rulesets::cache::{Clock, RulesetCache};
use crate::utils::http::{web_get_with, HttpError};

/// Fetch one ruleset and extract its rules
pub async fn fetch_ruleset(client: &Client, url: &str) -> Result<Vec<String>, HttpError> {
    let content = web_get_with(client, url).await?;
    Ok(parse_ruleset_payload(&content))
}

/// Fetch every ruleset in `sources`, keyed by ruleset name
///
/// Fresh cache entries are used as they are; everything else is fetched
/// concurrently and stored back into the cache. Rulesets that fail to fetch or
/// hold no rules are left out of the result.
///
/// # Arguments
/// * `client` - HTTP client for the downloads
/// * `sources` - Rulesets to resolve
/// * `cache` - Optional cache handle, `None` fetches everything
pub async fn fetch_rulesets<C: Clock>(
    client: &Client,
    sources: &[RulesetSource],
    mut cache: Option<&mut RulesetCache<C>>,
) -> HashMap<String, Vec<String>> {
    let mut rulesets = HashMap::new();
    let mut pending = Vec::new();

    for source in sources {
        if rulesets.contains_key(&source.name) || pending.contains(&source) {
            continue;
        }
        match cache.as_deref().and_then(|c| c.get(&source.name)) {
            Some(rules) => {
                info!("Using cached ruleset {} ({} rules)", source.name, rules.len());
                rulesets.insert(source.name.clone(), rules.to_vec());
            }
            None => pending.push(source),
        }
    }

    let results = join_all(
        pending
            .iter()
            .map(|source| fetch_ruleset(client, &source.url)),
    )
    .await;

    for (source, result) in pending.into_iter().zip(results) {
        match result {
            Ok(rules) if !rules.is_empty() => {
                info!("Fetched ruleset {} ({} rules)", source.name, rules.len());
                if let Some(cache) = cache.as_deref_mut() {
                    cache.set(&source.name, rules.clone());
                }
                rulesets.insert(source.name.clone(), rules);
            }
            Ok(_) => warn!("Ruleset {} contains no rules", source.name),
            Err(e) => warn!("Failed to fetch ruleset {}: {}", source.name, e),
        }
    }

    rulesets
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::rulesets::cache::tests::FakeClock;
    use crate::utils::http::{build_client, HttpConfig};

    fn source(name: &str, url: &str) -> RulesetSource {
        RulesetSource {
            name: name.to_string(),
            url: url.to_string(),
            policy: "P".to_string(),
        }
    }

    fn client() -> Client {
        build_client(&HttpConfig {
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_cache_hits_skip_network() {
        let mut cache = RulesetCache::with_clock(Duration::from_secs(60), FakeClock::default());
        cache.set("netflix", vec!["DOMAIN-SUFFIX,netflix.com".to_string()]);

        // The URL is never requested
        let sources = [source("netflix", "http://127.0.0.1:9/netflix.yaml")];
        let fetched = fetch_rulesets(&client(), &sources, Some(&mut cache)).await;
        assert_eq!(fetched["netflix"], ["DOMAIN-SUFFIX,netflix.com"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_omitted() {
        let mut cache = RulesetCache::with_clock(Duration::from_secs(60), FakeClock::default());
        let sources = [source("broken", "http://127.0.0.1:9/broken.yaml")];
        let fetched = fetch_rulesets(&client(), &sources, Some(&mut cache)).await;
        assert!(fetched.is_empty());
        assert!(cache.is_empty());
    }
}
