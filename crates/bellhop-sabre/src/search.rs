//! Search orchestration: cache, single-flight, auth, request, normalize,
//! enrich.

use std::sync::Arc;
use std::time::Duration;

use bellhop_cache::{search_cache_key, SingleFlight, TtlCache, SEARCH_TTL};
use bellhop_core::{
    enrich_hotel_results, filter_luxury_hotels, sort_by_luxury_status, AppConfig,
    EnrichedHotelResult, LuxuryProgram, LuxuryRegistry, SearchQuery,
};

use crate::auth::AuthManager;
use crate::client::SabreClient;
use crate::error::SabreError;
use crate::normalize::parse_search_response;
use crate::request::build_search_request;

pub(crate) const AVAIL_PATH: &str = "v3.0.0/get/hotelavail";

/// Front door for hotel availability searches.
///
/// Owns the full pipeline: deterministic cache key, TTL cache lookup,
/// per-key single-flight so concurrent identical queries cost one upstream
/// call, token acquisition, the availability POST with an explicit deadline,
/// tolerant normalization, and luxury enrichment. Failed searches are
/// returned to the caller and never cached.
pub struct SearchOrchestrator {
    client: Arc<SabreClient>,
    auth: Arc<AuthManager>,
    registry: Arc<LuxuryRegistry>,
    cache: Arc<TtlCache<Vec<EnrichedHotelResult>>>,
    flight: SingleFlight,
    search_timeout: Duration,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(
        client: Arc<SabreClient>,
        auth: Arc<AuthManager>,
        registry: Arc<LuxuryRegistry>,
        config: &AppConfig,
    ) -> Self {
        Self {
            client,
            auth,
            registry,
            cache: Arc::new(TtlCache::new()),
            flight: SingleFlight::new(),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
        }
    }

    /// The result cache, exposed so callers can attach a background sweeper.
    #[must_use]
    pub fn cache(&self) -> Arc<TtlCache<Vec<EnrichedHotelResult>>> {
        Arc::clone(&self.cache)
    }

    /// Runs a search, serving from cache when a fresh entry exists.
    ///
    /// Concurrent calls with the same cache key coalesce: one leader goes
    /// upstream while followers wait on the per-key lock and then hit the
    /// freshly populated cache.
    ///
    /// # Errors
    ///
    /// Propagates [`SabreError`] from authentication or the availability
    /// call. Errors are not retried here and never poison the cache.
    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<EnrichedHotelResult>, SabreError> {
        let key = search_cache_key(query);

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(cache_key = %key, hotels = hit.len(), "search cache hit");
            return Ok(hit);
        }

        let guard = self.flight.acquire(&key).await;
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(cache_key = %key, hotels = hit.len(), "search coalesced onto leader");
            return Ok(hit);
        }

        let result = self.fetch_and_cache(&key, query).await;
        // Release the per-key lock before pruning so an erroring search does
        // not leave its own entry in the map.
        drop(guard);
        self.flight.prune_idle();
        result
    }

    /// Number of search keys currently holding a single-flight slot.
    #[must_use]
    pub fn inflight_keys(&self) -> usize {
        self.flight.len()
    }

    async fn fetch_and_cache(
        &self,
        key: &str,
        query: &SearchQuery,
    ) -> Result<Vec<EnrichedHotelResult>, SabreError> {
        let token = self.auth.token().await?;
        let request = build_search_request(query);
        let body = self
            .client
            .post_json(AVAIL_PATH, &token, &request, self.search_timeout, "hotel availability")
            .await?;

        let hotels = parse_search_response(&body);
        let enriched = enrich_hotel_results(&self.registry, hotels);
        tracing::info!(
            cache_key = %key,
            hotels = enriched.len(),
            luxury = enriched.iter().filter(|h| h.is_luxury).count(),
            "search completed"
        );

        self.cache.insert(key, enriched.clone(), SEARCH_TTL);
        Ok(enriched)
    }

    /// Search restricted to luxury inventory, sorted luxury-first.
    ///
    /// `programs` of `None` keeps every luxury hotel; otherwise a hotel
    /// stays if it participates in at least one listed program.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SearchOrchestrator::search`].
    pub async fn search_luxury(
        &self,
        query: &SearchQuery,
        programs: Option<&[LuxuryProgram]>,
    ) -> Result<Vec<EnrichedHotelResult>, SabreError> {
        let all = self.search(query).await?;
        let mut filtered = filter_luxury_hotels(&all, programs);
        sort_by_luxury_status(&mut filtered);
        Ok(filtered)
    }
}
