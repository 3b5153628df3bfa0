use async_trait::async_trait;
use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::gateway::memory::MemoryAssetStore;
use portfolio_tracker_core::gateway::traits::AssetStore;
use portfolio_tracker_core::models::asset::{AssetId, AssetRecord};
use portfolio_tracker_core::PortfolioTracker;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn record(value: serde_json::Value) -> AssetRecord {
    serde_json::from_value(value).unwrap()
}

/// Store double whose failures can be toggled mid-test, for exercising the
/// no-mutation-on-failure guarantee.
struct FlakyStore {
    inner: MemoryAssetStore,
    fail: Arc<AtomicBool>,
}

impl FlakyStore {
    fn new() -> (Self, Arc<AtomicBool>) {
        let fail = Arc::new(AtomicBool::new(false));
        let store = Self {
            inner: MemoryAssetStore::new(),
            fail: Arc::clone(&fail),
        };
        (store, fail)
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(CoreError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AssetStore for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn list(&self) -> Result<Vec<AssetRecord>, CoreError> {
        self.check()?;
        self.inner.list().await
    }

    async fn create(&self, record: AssetRecord) -> Result<AssetRecord, CoreError> {
        self.check()?;
        self.inner.create(record).await
    }

    async fn delete(&self, id: &AssetId) -> Result<(), CoreError> {
        self.check()?;
        self.inner.delete(id).await
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MemoryAssetStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = MemoryAssetStore::new();
        let a = store
            .create(AssetRecord::build("gold", &form(&[("name", "a")])))
            .await
            .unwrap();
        let b = store
            .create(AssetRecord::build("gold", &form(&[("name", "b")])))
            .await
            .unwrap();

        assert!(a.id.is_some());
        assert!(b.id.is_some());
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn list_returns_created_records() {
        let store = MemoryAssetStore::new();
        let saved = store
            .create(AssetRecord::build(
                "stocks",
                &form(&[("name", "Apple"), ("ticker", "AAPL")]),
            ))
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![saved]);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemoryAssetStore::new();
        let a = store
            .create(AssetRecord::build("gold", &form(&[("name", "a")])))
            .await
            .unwrap();
        let b = store
            .create(AssetRecord::build("gold", &form(&[("name", "b")])))
            .await
            .unwrap();

        store.delete(a.id.as_ref().unwrap()).await.unwrap();
        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_an_error() {
        let store = MemoryAssetStore::new();
        let err = store.delete(&AssetId::new("nope")).await.unwrap_err();
        assert!(matches!(err, CoreError::AssetNotFound(_)));
    }

    #[tokio::test]
    async fn seeded_records_are_listed_as_given() {
        let legacy = record(json!({
            "id": 1,
            "category": "property",
            "name": "Flat",
            "purchase_value": "4500000",
        }));
        let store = MemoryAssetStore::with_records(vec![legacy.clone()]);
        assert_eq!(store.list().await.unwrap(), vec![legacy]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PortfolioTracker round-trips
// ═══════════════════════════════════════════════════════════════════

mod tracker {
    use super::*;

    #[tokio::test]
    async fn add_asset_joins_cache_with_id() {
        let mut tracker = PortfolioTracker::in_memory();
        let saved = tracker
            .add_asset(
                "gold",
                &form(&[
                    ("name", "Coins"),
                    ("purchaseValue", "80000"),
                    ("purchaseDate", "2023-02-01"),
                    ("currentValue", "95000"),
                    ("weight", "40g"),
                ]),
            )
            .await
            .unwrap();

        assert!(saved.id.is_some());
        assert_eq!(tracker.asset_count(), 1);
        assert_eq!(tracker.assets()[0], saved);
        assert_eq!(tracker.portfolio_total(), 95_000.0);
    }

    #[tokio::test]
    async fn refresh_replaces_cache_wholesale() {
        let store = MemoryAssetStore::with_records(vec![
            record(json!({ "id": 1, "category": "gold", "currentValue": 1000 })),
            record(json!({ "id": 2, "category": "stocks", "purchaseValue": 2000 })),
        ]);
        let mut tracker = PortfolioTracker::new(Box::new(store));

        assert_eq!(tracker.asset_count(), 0);
        let count = tracker.refresh().await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(tracker.portfolio_total(), 3000.0);
    }

    #[tokio::test]
    async fn remove_asset_drops_exactly_that_record() {
        let mut tracker = PortfolioTracker::in_memory();
        let keep = tracker
            .add_asset("gold", &form(&[("name", "keep"), ("currentValue", "100")]))
            .await
            .unwrap();
        let drop = tracker
            .add_asset("gold", &form(&[("name", "drop"), ("currentValue", "900")]))
            .await
            .unwrap();

        tracker.remove_asset(drop.id.as_ref().unwrap()).await.unwrap();

        assert_eq!(tracker.asset_count(), 1);
        assert_eq!(tracker.assets()[0].id, keep.id);
        assert_eq!(tracker.portfolio_total(), 100.0);
        assert!(tracker.get_asset(drop.id.as_ref().unwrap()).is_none());
    }

    #[tokio::test]
    async fn assets_in_category_filters_exactly() {
        let mut tracker = PortfolioTracker::in_memory();
        tracker
            .add_asset("gold", &form(&[("name", "a")]))
            .await
            .unwrap();
        tracker
            .add_asset("stocks", &form(&[("name", "b")]))
            .await
            .unwrap();

        let gold = tracker.assets_in_category("gold");
        assert_eq!(gold.len(), 1);
        assert_eq!(gold[0].name, "a");
        assert!(tracker.assets_in_category("crypto").is_empty());
    }

    #[tokio::test]
    async fn legacy_records_flow_through_aggregation() {
        let store = MemoryAssetStore::with_records(vec![
            record(json!({ "id": 1, "category": "property", "current_value": "4,500,000" })),
            record(json!({ "id": 2, "category": "property", "value": 500000 })),
            record(json!({ "id": 3, "name": "orphan", "purchase_value": "100" })),
        ]);
        let mut tracker = PortfolioTracker::new(Box::new(store));
        tracker.refresh().await.unwrap();

        let totals = tracker.category_totals();
        assert_eq!(totals[0].name, "property");
        assert_eq!(totals[0].value, 5_000_000.0);
        assert_eq!(totals[1].name, "Uncategorized");
        assert_eq!(totals[1].value, 100.0);
        assert_eq!(tracker.portfolio_total(), 5_000_100.0);
    }

    #[tokio::test]
    async fn export_round_trips_the_cache() {
        let mut tracker = PortfolioTracker::in_memory();
        tracker
            .add_asset("gold", &form(&[("name", "a"), ("currentValue", "1000")]))
            .await
            .unwrap();

        let json = tracker.export_assets_to_json().unwrap();
        let back: Vec<AssetRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tracker.assets());
    }

    #[tokio::test]
    async fn summary_matches_tiles() {
        let mut tracker = PortfolioTracker::in_memory();
        tracker
            .add_asset("gold", &form(&[("name", "a"), ("currentValue", "1000")]))
            .await
            .unwrap();
        tracker
            .add_asset("gold", &form(&[("name", "b"), ("currentValue", "500")]))
            .await
            .unwrap();

        let summary = tracker.summary();
        assert_eq!(summary.total_value, 1500.0);
        assert_eq!(summary.categories[0].asset_count, 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Failure semantics: a failed store call never mutates local state
// ═══════════════════════════════════════════════════════════════════

mod failure_semantics {
    use super::*;

    #[tokio::test]
    async fn failed_create_adds_nothing_locally() {
        let (store, fail) = FlakyStore::new();
        let mut tracker = PortfolioTracker::new(Box::new(store));

        fail.store(true, Ordering::SeqCst);
        let result = tracker
            .add_asset("gold", &form(&[("name", "ghost"), ("currentValue", "100")]))
            .await;

        assert!(matches!(result, Err(CoreError::Network(_))));
        assert_eq!(tracker.asset_count(), 0);
        assert_eq!(tracker.portfolio_total(), 0.0);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_collection() {
        let (store, fail) = FlakyStore::new();
        let mut tracker = PortfolioTracker::new(Box::new(store));
        tracker
            .add_asset("gold", &form(&[("name", "a"), ("currentValue", "100")]))
            .await
            .unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(tracker.refresh().await.is_err());

        // Aggregation still operates on the last good collection
        assert_eq!(tracker.asset_count(), 1);
        assert_eq!(tracker.portfolio_total(), 100.0);
    }

    #[tokio::test]
    async fn failed_delete_removes_nothing_locally() {
        let (store, fail) = FlakyStore::new();
        let mut tracker = PortfolioTracker::new(Box::new(store));
        let saved = tracker
            .add_asset("gold", &form(&[("name", "a"), ("currentValue", "100")]))
            .await
            .unwrap();

        fail.store(true, Ordering::SeqCst);
        let err = tracker
            .remove_asset(saved.id.as_ref().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Network(_)));
        assert_eq!(tracker.asset_count(), 1);
        assert_eq!(tracker.portfolio_total(), 100.0);
    }
}
