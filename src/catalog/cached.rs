//! Caching catalog provider implementation
//!
//! This module provides a caching wrapper for catalog providers that
//! stores responses in memory and reuses them until they expire. One
//! namespace exists per query shape: the full catalog, show-by-id,
//! cast-by-show-id, and search results keyed by normalized query.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::{CastMember, CatalogApi, FetchFailed, Show};
use crate::cache::{CacheMap, CacheSlot};

/// How long a cached response stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(1800);

/// The four cache namespaces, one per query shape.
#[derive(Debug)]
struct Namespaces {
    catalog: CacheSlot<Vec<Show>>,
    shows_by_id: CacheMap<u32, Show>,
    cast_by_show: CacheMap<u32, Vec<CastMember>>,
    search: CacheMap<String, Vec<Show>>,
}

impl Namespaces {
    fn new(ttl: Duration) -> Self {
        Self {
            catalog: CacheSlot::new(ttl),
            shows_by_id: CacheMap::new(ttl),
            cast_by_show: CacheMap::new(ttl),
            search: CacheMap::new(ttl),
        }
    }
}

/// A caching wrapper for catalog providers.
///
/// Wraps another catalog provider and caches its responses to avoid
/// redundant network requests. Each instance owns its cache, so tests
/// and embedders can create isolated instances instead of sharing
/// process-wide state.
///
/// A request in flight does not reserve its cache slot: two
/// near-simultaneous callers missing on the same key both hit the
/// provider, and the last response stored wins. That wastes a request
/// but never corrupts the cache.
#[derive(Debug)]
pub struct CachedCatalog<P> {
    /// The underlying catalog provider
    provider: P,
    /// Shared cache state, never held across an await
    cache: Mutex<Namespaces>,
}

impl<P> CachedCatalog<P>
where
    P: CatalogApi,
{
    /// Creates a cached catalog with the default 30 minute TTL.
    pub fn new(provider: P) -> Self {
        Self::with_ttl(provider, DEFAULT_TTL)
    }

    /// Creates a cached catalog whose entries expire after `ttl`.
    pub fn with_ttl(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            cache: Mutex::new(Namespaces::new(ttl)),
        }
    }

    /// Empties every cache namespace. Idempotent.
    pub fn clear_cache(&self) {
        let mut cache = self.lock();
        cache.catalog.clear();
        cache.shows_by_id.clear();
        cache.cast_by_show.clear();
        cache.search.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Namespaces> {
        // A poisoned lock only means a panic elsewhere; the cache itself
        // is still usable.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Normalizes a search query for use as a cache key, so queries that
/// differ only in case or surrounding whitespace share one entry.
fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

impl<P> CatalogApi for CachedCatalog<P>
where
    P: CatalogApi,
{
    async fn shows(&self) -> Result<Vec<Show>, FetchFailed> {
        if let Some(shows) = self.lock().catalog.get() {
            tracing::debug!("catalog cache hit");
            return Ok(shows);
        }

        let shows = self.provider.shows().await?;
        self.lock().catalog.insert(shows.clone());
        Ok(shows)
    }

    async fn show(&self, id: u32) -> Result<Show, FetchFailed> {
        if let Some(show) = self.lock().shows_by_id.get(&id) {
            tracing::debug!(id, "show cache hit");
            return Ok(show);
        }

        let show = self.provider.show(id).await?;
        self.lock().shows_by_id.insert(id, show.clone());
        Ok(show)
    }

    async fn cast(&self, id: u32) -> Result<Vec<CastMember>, FetchFailed> {
        if let Some(cast) = self.lock().cast_by_show.get(&id) {
            tracing::debug!(id, "cast cache hit");
            return Ok(cast);
        }

        let cast = self.provider.cast(id).await?;
        self.lock().cast_by_show.insert(id, cast.clone());
        Ok(cast)
    }

    async fn search(&self, query: &str) -> Result<Vec<Show>, FetchFailed> {
        let key = normalize_query(query);
        if let Some(results) = self.lock().search.get(&key) {
            tracing::debug!(query = %key, "search cache hit");
            return Ok(results);
        }

        let results = self.provider.search(query).await?;
        self.lock().search.insert(key, results.clone());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TvMazeClient;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn show_body(id: u32, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "genres": ["Drama"],
            "rating": { "average": 8.0 },
            "status": "Running",
        })
    }

    fn catalog_against(server: &MockServer, ttl: Duration) -> CachedCatalog<TvMazeClient> {
        CachedCatalog::with_ttl(TvMazeClient::with_base_url(server.uri()), ttl)
    }

    #[tokio::test]
    async fn show_by_id_within_ttl_issues_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_body(1, "Cached")))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_against(&server, Duration::from_secs(60));
        let first = catalog.show(1).await.unwrap();
        let second = catalog.show(1).await.unwrap();

        assert_eq!(first, second);
        server.verify().await;
    }

    #[tokio::test]
    async fn expired_entry_is_refetched_and_replaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_body(1, "Stale")))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/shows/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_body(1, "Fresh")))
            .expect(1)
            .mount(&server)
            .await;

        // Zero TTL: every entry is stale the moment it is stored.
        let catalog = catalog_against(&server, Duration::ZERO);
        let first = catalog.show(1).await.unwrap();
        let second = catalog.show(1).await.unwrap();

        assert_eq!(first.name, "Stale");
        assert_eq!(second.name, "Fresh");
        server.verify().await;
    }

    #[tokio::test]
    async fn full_catalog_is_cached_under_one_slot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([show_body(1, "Only")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_against(&server, Duration::from_secs(60));
        catalog.shows().await.unwrap();
        let shows = catalog.shows().await.unwrap();

        assert_eq!(shows.len(), 1);
        server.verify().await;
    }

    #[tokio::test]
    async fn cast_is_cached_per_show_id() {
        let server = MockServer::start().await;
        for id in [1, 2] {
            Mock::given(method("GET"))
                .and(path(format!("/shows/{id}/cast")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    {
                        "person": { "id": 100 + id, "name": format!("Actor {id}") },
                        "character": { "id": 200 + id, "name": "Role" },
                    }
                ])))
                .expect(1)
                .mount(&server)
                .await;
        }

        let catalog = catalog_against(&server, Duration::from_secs(60));
        catalog.cast(1).await.unwrap();
        catalog.cast(1).await.unwrap();
        let cast = catalog.cast(2).await.unwrap();

        assert_eq!(cast[0].person.name, "Actor 2");
        server.verify().await;
    }

    #[tokio::test]
    async fn search_key_ignores_case_and_whitespace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/shows"))
            .and(query_param("q", "  TEST  "))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "score": 1.0, "show": show_body(1, "Match") },
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_against(&server, Duration::from_secs(60));
        let first = catalog.search("  TEST  ").await.unwrap();
        let second = catalog.search("test").await.unwrap();

        assert_eq!(first, second);
        server.verify().await;
    }

    #[tokio::test]
    async fn clear_cache_forces_fresh_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_body(1, "Again")))
            .expect(2)
            .mount(&server)
            .await;

        let catalog = catalog_against(&server, Duration::from_secs(60));
        catalog.show(1).await.unwrap();
        catalog.clear_cache();
        catalog.show(1).await.unwrap();

        server.verify().await;
    }

    #[tokio::test]
    async fn failures_propagate_and_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shows/1"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/shows/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_body(1, "Recovered")))
            .mount(&server)
            .await;

        let catalog = catalog_against(&server, Duration::from_secs(60));
        let err = catalog.show(1).await.unwrap_err();
        assert_eq!(err.to_string(), "failed to fetch show details");

        // A fresh user-triggered fetch succeeds; the failure left no entry.
        let show = catalog.show(1).await.unwrap();
        assert_eq!(show.name, "Recovered");
    }
}
