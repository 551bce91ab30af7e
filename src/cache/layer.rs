//! Response cache keyed by operation path and request body.

use chrono::{DateTime, Duration, Utc};
use color_eyre::Result;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::storage::{CacheStorage, CachedResponse};

/// How much of the human-readable key description is kept for debugging.
const DESCRIPTION_LIMIT: usize = 120;

/// Cache of successful backend responses, one entry per (path, body) pair.
///
/// Entries are only ever overwritten by a newer success for the same key;
/// there is no eviction. An optional max age bounds what `lookup` will
/// return - older entries are treated as misses but left in place.
pub struct ResponseCache<S: CacheStorage> {
  storage: Arc<S>,
  max_age: Option<Duration>,
}

impl<S: CacheStorage> ResponseCache<S> {
  /// Create a new response cache over the given storage backend.
  pub fn new(storage: S) -> Self {
    Self {
      storage: Arc::new(storage),
      max_age: None,
    }
  }

  /// Bound how old an entry may be before `lookup` ignores it.
  /// `None` serves entries regardless of age.
  pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
    self.max_age = max_age;
    self
  }

  /// Store the payload for one successful call.
  pub fn store(&self, path: &str, request: &Value, payload: &Value) -> Result<()> {
    let key = cache_key(path, request);
    let description = describe(path, request);
    self.storage.put(&key, &description, payload)
  }

  /// Fetch the last successful payload for the same (path, body), if it
  /// exists and is within the configured max age.
  pub fn lookup(&self, path: &str, request: &Value) -> Result<Option<CachedResponse>> {
    let key = cache_key(path, request);
    match self.storage.get(&key)? {
      Some(cached) if !self.is_expired(cached.cached_at) => Ok(Some(cached)),
      _ => Ok(None),
    }
  }

  /// Drop every cached response.
  pub fn clear(&self) -> Result<()> {
    self.storage.clear()
  }

  fn is_expired(&self, cached_at: DateTime<Utc>) -> bool {
    match self.max_age {
      Some(max_age) => Utc::now() - cached_at > max_age,
      None => false,
    }
  }
}

impl<S: CacheStorage> Clone for ResponseCache<S> {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      max_age: self.max_age,
    }
  }
}

/// Deterministic key for one (path, request body) pair.
///
/// SHA256 hash for stable, fixed-length keys.
fn cache_key(path: &str, request: &Value) -> String {
  let mut hasher = Sha256::new();
  hasher.update(path.as_bytes());
  hasher.update(b":");
  hasher.update(request.to_string().as_bytes());
  hex::encode(hasher.finalize())
}

/// Human-readable description stored next to the hash for debugging.
fn describe(path: &str, request: &Value) -> String {
  let mut description = format!("{} {}", path, request);
  if description.len() > DESCRIPTION_LIMIT {
    description.truncate(DESCRIPTION_LIMIT);
  }
  description
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::MemoryStorage;
  use serde_json::json;

  #[test]
  fn lookup_hits_only_for_same_path_and_body() {
    let cache = ResponseCache::new(MemoryStorage::new());
    let body = json!({"skills": ["html"]});
    cache
      .store("/match-jobs", &body, &json!({"qualified_jobs": []}))
      .expect("store");

    assert!(cache.lookup("/match-jobs", &body).expect("lookup").is_some());
    assert!(cache
      .lookup("/match-jobs", &json!({"skills": ["css"]}))
      .expect("lookup")
      .is_none());
    assert!(cache
      .lookup("/market-insights", &body)
      .expect("lookup")
      .is_none());
  }

  #[test]
  fn newer_success_overwrites_the_key() {
    let cache = ResponseCache::new(MemoryStorage::new());
    let body = json!({"skills": []});
    cache.store("/p", &body, &json!(1)).expect("store");
    cache.store("/p", &body, &json!(2)).expect("store");

    let hit = cache.lookup("/p", &body).expect("lookup").expect("hit");
    assert_eq!(hit.payload, json!(2));
  }

  #[test]
  fn max_age_turns_old_entries_into_misses() {
    let body = json!({"skills": []});

    let unbounded = ResponseCache::new(MemoryStorage::new());
    unbounded.store("/p", &body, &json!(1)).expect("store");
    assert!(unbounded.lookup("/p", &body).expect("lookup").is_some());

    let strict = ResponseCache::new(MemoryStorage::new()).with_max_age(Some(Duration::zero()));
    strict.store("/p", &body, &json!(1)).expect("store");
    // Anything older than "no age at all" is expired
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(strict.lookup("/p", &body).expect("lookup").is_none());
  }

  #[test]
  fn clear_drops_entries() {
    let cache = ResponseCache::new(MemoryStorage::new());
    let body = json!({});
    cache.store("/p", &body, &json!(1)).expect("store");
    cache.clear().expect("clear");
    assert!(cache.lookup("/p", &body).expect("lookup").is_none());
  }
}
