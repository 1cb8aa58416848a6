//! Persistent cache of fetched ruleset bodies
//!
//! The cache is an explicit handle passed to the fetcher. Time comes from an
//! injected [`Clock`] so expiry can be exercised without waiting.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::file_write;

/// File name of the cache inside the cache directory
pub const CACHE_FILE_NAME: &str = "rulesets_cache.json";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to write cache file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize cache: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of the current time, in seconds since the Unix epoch
pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CacheEntry {
    data: Vec<String>,
    timestamp: u64,
}

fn cache_key(name: &str) -> String {
    format!("ruleset_{}", name)
}

/// Location of the cache file for `cache_dir`
pub fn cache_file(cache_dir: &str) -> PathBuf {
    Path::new(cache_dir).join(CACHE_FILE_NAME)
}

/// Ruleset bodies keyed by ruleset name, valid for `expiry` after being stored
#[derive(Debug)]
pub struct RulesetCache<C: Clock = SystemClock> {
    entries: BTreeMap<String, CacheEntry>,
    expiry: Duration,
    clock: C,
}

impl RulesetCache<SystemClock> {
    pub fn new(expiry: Duration) -> Self {
        Self::with_clock(expiry, SystemClock)
    }
}

impl<C: Clock> RulesetCache<C> {
    pub fn with_clock(expiry: Duration, clock: C) -> Self {
        RulesetCache {
            entries: BTreeMap::new(),
            expiry,
            clock,
        }
    }

    /// Loads a cache file. A missing file gives an empty cache, so does a
    /// corrupt one after a warning.
    pub fn load(path: &Path, expiry: Duration, clock: C) -> Self {
        let mut cache = Self::with_clock(expiry, clock);
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No ruleset cache at {}", path.display());
                return cache;
            }
            Err(e) => {
                warn!("Failed to read ruleset cache {}: {}", path.display(), e);
                return cache;
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => cache.entries = entries,
            Err(e) => warn!("Ignoring corrupt ruleset cache {}: {}", path.display(), e),
        }
        cache
    }

    /// Writes every entry, expired or not, as pretty printed JSON
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        file_write(path, &json)?;
        Ok(())
    }

    /// Returns the rules stored for `name` if they have not expired
    pub fn get(&self, name: &str) -> Option<&[String]> {
        let entry = self.entries.get(&cache_key(name))?;
        let age = self.clock.now().saturating_sub(entry.timestamp);
        (age < self.expiry.as_secs()).then_some(entry.data.as_slice())
    }

    pub fn set(&mut self, name: &str, data: Vec<String>) {
        let timestamp = self.clock.now();
        self.entries
            .insert(cache_key(name), CacheEntry { data, timestamp });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }
}
