use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use super::traits::AssetStore;
use crate::errors::CoreError;
use crate::models::asset::{AssetId, AssetRecord};

/// In-process asset store.
///
/// Backs offline use and the test suites: same contract as the HTTP store,
/// including id assignment on create. Ids are random v4 UUIDs rendered as
/// strings, opaque to the rest of the system.
pub struct MemoryAssetStore {
    records: Mutex<Vec<AssetRecord>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Seed the store with existing records (e.g. legacy data in tests).
    /// Records are stored as given; ids are not reassigned.
    pub fn with_records(records: Vec<AssetRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetStore for MemoryAssetStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<AssetRecord>, CoreError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.clone())
    }

    async fn create(&self, mut record: AssetRecord) -> Result<AssetRecord, CoreError> {
        record.id = Some(AssetId::new(Uuid::new_v4().to_string()));
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &AssetId) -> Result<(), CoreError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let idx = records
            .iter()
            .position(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| CoreError::AssetNotFound(id.to_string()))?;
        records.remove(idx);
        Ok(())
    }
}
