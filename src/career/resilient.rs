//! Resilient request layer: retry, then cache, then stub.
//!
//! Every call prefers a live backend answer but is guaranteed to produce
//! *some* answer whenever a stub is registered for the operation. The three
//! tiers all decode into the same typed response, so callers only learn how
//! an answer was produced from the outcome's [`ResponseSource`].

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::{CacheStorage, ResponseCache};
use crate::stubs::StubTable;

use super::client::{ApiError, Transport};
use super::wire::Operation;

const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);

/// Which tier produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
  /// Live backend answer
  Backend,
  /// Backend unreachable, served from the response cache
  CacheFallback,
  /// Backend unreachable and nothing cached, computed by a local stub
  StubFallback,
  /// Backend disabled by configuration, computed by a local stub
  StubOnly,
}

impl ResponseSource {
  /// True when the caller asked for a live answer and got a substitute.
  pub fn degraded(self) -> bool {
    matches!(self, ResponseSource::CacheFallback | ResponseSource::StubFallback)
  }
}

/// Result of a resilient fetch: the data plus where it came from.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
  pub data: T,
  pub source: ResponseSource,
  /// Capture time of the served entry, when the source is the cache
  pub cached_at: Option<DateTime<Utc>>,
}

impl<T> FetchOutcome<T> {
  pub fn backend(data: T) -> Self {
    Self {
      data,
      source: ResponseSource::Backend,
      cached_at: None,
    }
  }

  pub fn cache_fallback(data: T, cached_at: DateTime<Utc>) -> Self {
    Self {
      data,
      source: ResponseSource::CacheFallback,
      cached_at: Some(cached_at),
    }
  }

  pub fn stub_fallback(data: T) -> Self {
    Self {
      data,
      source: ResponseSource::StubFallback,
      cached_at: None,
    }
  }

  pub fn stub_only(data: T) -> Self {
    Self {
      data,
      source: ResponseSource::StubOnly,
      cached_at: None,
    }
  }

  pub fn degraded(&self) -> bool {
    self.source.degraded()
  }
}

/// Client wrapper that retries, caches successes, and falls back.
pub struct ResilientClient<T: Transport, S: CacheStorage> {
  transport: T,
  cache: ResponseCache<S>,
  stubs: StubTable,
  max_attempts: u32,
  backoff: Duration,
}

impl<T: Transport, S: CacheStorage> ResilientClient<T, S> {
  pub fn new(transport: T, cache: ResponseCache<S>, stubs: StubTable) -> Self {
    Self {
      transport,
      cache,
      stubs,
      max_attempts: DEFAULT_MAX_ATTEMPTS,
      backoff: DEFAULT_BACKOFF,
    }
  }

  /// Override the retry budget. `backoff` is the base delay; the wait before
  /// attempt n+1 is `backoff * n`, a linear ramp.
  pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
    self.max_attempts = max_attempts.max(1);
    self.backoff = backoff;
    self
  }

  /// Issue one logical operation, degrading through cache and stub tiers.
  pub async fn post<Req, Resp>(
    &self,
    operation: Operation,
    request: &Req,
  ) -> Result<FetchOutcome<Resp>, ApiError>
  where
    Req: Serialize + Sync,
    Resp: DeserializeOwned,
  {
    let path = operation.path();
    let body = serde_json::to_value(request).map_err(|source| ApiError::InvalidRequest {
      path: path.to_string(),
      source,
    })?;

    let mut last_err: Option<ApiError> = None;
    for attempt in 1..=self.max_attempts {
      if attempt > 1 {
        tokio::time::sleep(self.backoff * (attempt - 1)).await;
      }

      match self.transport.post_json(path, &body).await {
        Ok(payload) => match serde_json::from_value::<Resp>(payload.clone()) {
          Ok(data) => {
            debug!(path, attempt, "backend call succeeded");
            if let Err(e) = self.cache.store(path, &body, &payload) {
              warn!(path, error = %e, "failed to cache backend response");
            }
            return Ok(FetchOutcome::backend(data));
          }
          Err(source) => {
            warn!(path, attempt, error = %source, "backend response did not match schema");
            last_err = Some(ApiError::MalformedResponse {
              path: path.to_string(),
              source,
            });
          }
        },
        Err(e) => {
          warn!(path, attempt, error = %e, "backend attempt failed");
          last_err = Some(e);
        }
      }
    }

    // Tier two: the response cache
    match self.cache.lookup(path, &body) {
      Ok(Some(cached)) => match serde_json::from_value::<Resp>(cached.payload.clone()) {
        Ok(data) => {
          warn!(path, "backend unavailable, serving cached response");
          return Ok(FetchOutcome::cache_fallback(data, cached.cached_at));
        }
        Err(e) => {
          warn!(path, error = %e, "cached payload no longer decodes, ignoring it");
        }
      },
      Ok(None) => {}
      Err(e) => {
        warn!(path, error = %e, "cache lookup failed");
      }
    }

    // Tier three: the stub for this operation
    if let Some(result) = self.stubs.run(operation, &body) {
      let payload = result.map_err(|source| ApiError::MalformedResponse {
        path: path.to_string(),
        source,
      })?;
      let data =
        serde_json::from_value(payload).map_err(|source| ApiError::MalformedResponse {
          path: path.to_string(),
          source,
        })?;
      warn!(path, "backend unavailable, serving stub response");
      return Ok(FetchOutcome::stub_fallback(data));
    }

    Err(ApiError::Exhausted {
      path: path.to_string(),
      source: last_err.map(Box::new),
    })
  }

  /// Drop every cached response.
  pub fn clear_cache(&self) -> color_eyre::Result<()> {
    self.cache.clear()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::MemoryStorage;
  use crate::career::wire::{MatchJobsResponse, SkillsRequest};
  use crate::stubs::{StubOptions, StubTable};
  use async_trait::async_trait;
  use serde_json::json;
  use std::collections::VecDeque;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;

  /// Transport that replays a scripted sequence of outcomes.
  struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Value, u16>>>,
    calls: AtomicUsize,
  }

  impl ScriptedTransport {
    fn new(script: Vec<Result<Value, u16>>) -> Self {
      Self {
        script: Mutex::new(script.into()),
        calls: AtomicUsize::new(0),
      }
    }

    /// Every call fails with HTTP 503.
    fn unreachable() -> Self {
      Self::new(Vec::new())
    }

    fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }
  }

  #[async_trait]
  impl Transport for ScriptedTransport {
    async fn post_json(&self, path: &str, _body: &Value) -> Result<Value, ApiError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      let next = self.script.lock().expect("lock").pop_front();
      match next {
        Some(Ok(payload)) => Ok(payload),
        Some(Err(status)) => Err(ApiError::Http {
          path: path.to_string(),
          status,
        }),
        None => Err(ApiError::Http {
          path: path.to_string(),
          status: 503,
        }),
      }
    }
  }

  fn client(
    transport: ScriptedTransport,
    stubs: StubTable,
  ) -> ResilientClient<ScriptedTransport, MemoryStorage> {
    ResilientClient::new(transport, ResponseCache::new(MemoryStorage::new()), stubs)
      .with_retry(2, Duration::ZERO)
  }

  fn skills_request() -> SkillsRequest {
    SkillsRequest {
      skills: vec!["html".to_string(), "css".to_string(), "javascript".to_string()],
    }
  }

  fn live_payload() -> Value {
    json!({ "qualified_jobs": [] })
  }

  #[tokio::test]
  async fn fail_then_success_returns_backend_data() {
    let client = client(
      ScriptedTransport::new(vec![Err(500), Ok(live_payload())]),
      StubTable::empty(StubOptions::default()),
    );

    let outcome: FetchOutcome<MatchJobsResponse> = client
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("second attempt succeeds");

    assert_eq!(outcome.source, ResponseSource::Backend);
    assert!(!outcome.degraded());
    assert_eq!(client.transport.calls(), 2);
  }

  #[tokio::test]
  async fn success_is_cached_and_served_on_later_failure() {
    let cache = ResponseCache::new(MemoryStorage::new());
    let live = json!({ "qualified_jobs": [] });

    let client = ResilientClient::new(
      ScriptedTransport::new(vec![Ok(live.clone())]),
      cache.clone(),
      StubTable::empty(StubOptions::default()),
    )
    .with_retry(2, Duration::ZERO);

    let first: FetchOutcome<MatchJobsResponse> = client
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("live success");
    assert_eq!(first.source, ResponseSource::Backend);

    // Same (path, body), backend now unreachable: the cached payload comes
    // back exactly and the outcome is marked degraded.
    let offline = ResilientClient::new(
      ScriptedTransport::unreachable(),
      cache,
      StubTable::empty(StubOptions::default()),
    )
    .with_retry(2, Duration::ZERO);

    let second: FetchOutcome<MatchJobsResponse> = offline
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("cache fallback");

    assert_eq!(second.source, ResponseSource::CacheFallback);
    assert!(second.degraded());
    assert!(second.cached_at.is_some());
    assert_eq!(second.data, first.data);
  }

  #[tokio::test]
  async fn different_body_misses_the_cache() {
    let cache = ResponseCache::new(MemoryStorage::new());
    let seeded = ResilientClient::new(
      ScriptedTransport::new(vec![Ok(live_payload())]),
      cache.clone(),
      StubTable::empty(StubOptions::default()),
    )
    .with_retry(2, Duration::ZERO);
    let _: FetchOutcome<MatchJobsResponse> = seeded
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("seed");

    let offline = ResilientClient::new(
      ScriptedTransport::unreachable(),
      cache,
      StubTable::with_defaults(StubOptions::default()),
    )
    .with_retry(2, Duration::ZERO);

    // Different skills: no cache entry, so this lands on the stub tier
    let outcome: FetchOutcome<MatchJobsResponse> = offline
      .post(
        Operation::MatchJobs,
        &SkillsRequest {
          skills: vec!["python".to_string()],
        },
      )
      .await
      .expect("stub fallback");
    assert_eq!(outcome.source, ResponseSource::StubFallback);
  }

  #[tokio::test]
  async fn stub_fallback_when_nothing_is_cached() {
    let client = client(
      ScriptedTransport::unreachable(),
      StubTable::with_defaults(StubOptions {
        guarantee_non_empty: true,
      }),
    );

    let outcome: FetchOutcome<MatchJobsResponse> = client
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("stub fallback");

    assert_eq!(outcome.source, ResponseSource::StubFallback);
    assert!(outcome.degraded());
    assert!(outcome
      .data
      .qualified_jobs
      .iter()
      .any(|j| j.title == "Junior Web Developer"));
    // Both attempts were spent before degrading
    assert_eq!(client.transport.calls(), 2);
  }

  #[tokio::test]
  async fn exhaustion_propagates_the_last_error() {
    let client = client(
      ScriptedTransport::unreachable(),
      StubTable::empty(StubOptions::default()),
    );

    let result: Result<FetchOutcome<MatchJobsResponse>, ApiError> =
      client.post(Operation::MatchJobs, &skills_request()).await;

    match result {
      Err(ApiError::Exhausted { path, source }) => {
        assert_eq!(path, "/match-jobs");
        assert!(matches!(
          source.as_deref(),
          Some(ApiError::Http { status: 503, .. })
        ));
      }
      other => panic!("expected exhaustion, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn expired_cache_entries_fall_through_to_the_stub() {
    let cache =
      ResponseCache::new(MemoryStorage::new()).with_max_age(Some(chrono::Duration::zero()));
    let seeded = ResilientClient::new(
      ScriptedTransport::new(vec![Ok(live_payload())]),
      cache.clone(),
      StubTable::empty(StubOptions::default()),
    )
    .with_retry(2, Duration::ZERO);
    let _: FetchOutcome<MatchJobsResponse> = seeded
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("seed");

    tokio::time::sleep(Duration::from_millis(5)).await;

    let offline = ResilientClient::new(
      ScriptedTransport::unreachable(),
      cache,
      StubTable::with_defaults(StubOptions::default()),
    )
    .with_retry(2, Duration::ZERO);

    let outcome: FetchOutcome<MatchJobsResponse> = offline
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("stub fallback");
    assert_eq!(outcome.source, ResponseSource::StubFallback);
  }

  #[tokio::test]
  async fn malformed_success_counts_as_a_failed_attempt() {
    // First attempt returns a body that doesn't match the schema, second
    // attempt succeeds properly.
    let client = client(
      ScriptedTransport::new(vec![Ok(json!({ "unexpected": true })), Ok(live_payload())]),
      StubTable::empty(StubOptions::default()),
    );

    let outcome: FetchOutcome<MatchJobsResponse> = client
      .post(Operation::MatchJobs, &skills_request())
      .await
      .expect("second attempt succeeds");
    assert_eq!(outcome.source, ResponseSource::Backend);
    assert_eq!(client.transport.calls(), 2);
  }
}
