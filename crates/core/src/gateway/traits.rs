use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::{AssetId, AssetRecord};

/// Trait abstraction for the asset persistence boundary.
///
/// The core never performs I/O itself; it consumes whatever collection a
/// store hands it and pushes whole-record creates/deletes back through this
/// interface. Swapping the backing store (HTTP CRUD service, in-process
/// memory, something else) touches only the implementation, never the
/// normalization or aggregation code.
///
/// `list` may return records with inconsistent legacy field naming — that is
/// exactly what the normalizer's alias resolution exists for.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AssetStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the full asset collection.
    async fn list(&self) -> Result<Vec<AssetRecord>, CoreError>;

    /// Persist a new record. The store assigns the id; the returned record
    /// carries it.
    async fn create(&self, record: AssetRecord) -> Result<AssetRecord, CoreError>;

    /// Delete a record by id.
    async fn delete(&self, id: &AssetId) -> Result<(), CoreError>;
}
