pub mod errors;
pub mod gateway;
pub mod models;
pub mod normalize;
pub mod services;

use log::debug;
use std::collections::HashMap;

use errors::CoreError;
use gateway::http::HttpAssetStore;
use gateway::memory::MemoryAssetStore;
use gateway::traits::AssetStore;
use models::asset::{AssetId, AssetRecord};
use models::chart::ChartSlice;
use models::summary::PortfolioSummary;
use services::aggregation_service::{AggregationService, CategoryGroup};

/// Main entry point for the Portfolio Tracker core library.
///
/// Holds the locally cached asset collection and the aggregation logic that
/// derives every dashboard view from it. The cache is the "last successfully
/// fetched or mutated" collection: it is replaced wholesale by `refresh`,
/// optimistically extended by a successful `add_asset`, and shrunk by a
/// successful `remove_asset`. A failed store call never touches it, so the
/// dashboard always renders a consistent snapshot.
///
/// Single-owner, no internal locking: the store calls are the only await
/// points, and ordering between overlapping calls from different owners is
/// not guaranteed (single-user, single-session design).
#[must_use]
pub struct PortfolioTracker {
    store: Box<dyn AssetStore>,
    assets: Vec<AssetRecord>,
    aggregation: AggregationService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("store", &self.store.name())
            .field("assets", &self.assets.len())
            .finish()
    }
}

impl PortfolioTracker {
    /// Create a tracker on top of any asset store.
    pub fn new(store: Box<dyn AssetStore>) -> Self {
        Self {
            store,
            assets: Vec::new(),
            aggregation: AggregationService::new(),
        }
    }

    /// Tracker backed by the in-process store (offline use, tests).
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryAssetStore::new()))
    }

    /// Tracker backed by an HTTP CRUD store at `base_url`
    /// (e.g. `http://localhost:5000`).
    pub fn with_endpoint(base_url: impl Into<String>) -> Self {
        Self::new(Box::new(HttpAssetStore::new(base_url)))
    }

    // ── Store round-trips ───────────────────────────────────────────

    /// Replace the cached collection with a fresh fetch from the store.
    /// Returns the number of assets fetched. On failure the cache is left
    /// exactly as it was.
    pub async fn refresh(&mut self) -> Result<usize, CoreError> {
        let fetched = self.store.list().await?;
        let count = fetched.len();
        self.assets = fetched;
        debug!("refreshed {count} assets from {} store", self.store.name());
        Ok(count)
    }

    /// Build a normalized record from raw form input and persist it.
    ///
    /// The record (with its store-assigned id) joins the local cache only
    /// after the store accepts it — a failed create adds nothing locally.
    /// Required-field presence is the form's responsibility; absent
    /// numerics default to zero here rather than erroring.
    pub async fn add_asset(
        &mut self,
        category: &str,
        form: &HashMap<String, String>,
    ) -> Result<AssetRecord, CoreError> {
        let record = AssetRecord::build(category, form);
        let saved = self.store.create(record).await?;
        self.assets.push(saved.clone());
        Ok(saved)
    }

    /// Delete a record by id, remotely first, then locally.
    /// Removes exactly the matching record; a failed delete removes nothing.
    pub async fn remove_asset(&mut self, id: &AssetId) -> Result<(), CoreError> {
        self.store.delete(id).await?;
        self.assets.retain(|a| a.id.as_ref() != Some(id));
        Ok(())
    }

    // ── Cached collection ───────────────────────────────────────────

    /// The cached asset collection, in fetch/insertion order.
    #[must_use]
    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Look up a cached record by id.
    #[must_use]
    pub fn get_asset(&self, id: &AssetId) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.id.as_ref() == Some(id))
    }

    /// Cached records whose category tag matches exactly
    /// (the add-asset page listing).
    #[must_use]
    pub fn assets_in_category(&self, category: &str) -> Vec<&AssetRecord> {
        self.assets
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Stable partition of the cached collection by category.
    pub fn grouped(&self) -> Vec<CategoryGroup<'_>> {
        self.aggregation.group_by_category(&self.assets)
    }

    /// Chart-ready per-category totals, consumed by both the proportional
    /// and the magnitude visualization.
    #[must_use]
    pub fn category_totals(&self) -> Vec<ChartSlice> {
        let groups = self.aggregation.group_by_category(&self.assets);
        self.aggregation.category_totals(&groups)
    }

    /// Total portfolio valuation over the cached collection.
    #[must_use]
    pub fn portfolio_total(&self) -> f64 {
        self.aggregation.portfolio_total(&self.assets)
    }

    /// Dashboard summary: grand total plus per-category tiles.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        self.aggregation.summarize(&self.assets)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the cached collection as a pretty JSON string
    /// (unencrypted snapshot for backup or debugging).
    pub fn export_assets_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.assets)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize assets: {e}")))
    }
}
