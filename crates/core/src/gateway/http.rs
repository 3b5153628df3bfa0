use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::AssetStore;
use crate::errors::CoreError;
use crate::models::asset::{AssetId, AssetRecord};

/// HTTP-backed asset store speaking the plain JSON CRUD protocol:
///
/// - `GET {base}/assets` → array of raw asset objects
/// - `POST {base}/assets` → the posted record with an assigned `id`
/// - `DELETE {base}/assets/{id}` → success inferred from a 2xx status
///
/// Arbitrary field naming in listed records is tolerated; records
/// deserialize into the open `AssetRecord` shape and legacy keys survive
/// for alias resolution downstream.
pub struct HttpAssetStore {
    client: Client,
    base_url: String,
}

impl HttpAssetStore {
    /// Create a store against a base URL such as `http://localhost:5000`.
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));

        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn assets_url(&self) -> String {
        format!("{}/assets", self.base_url)
    }

    /// Map a non-2xx response to a `Gateway` error carrying the status and
    /// whatever body the store sent back.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        warn!("asset store returned HTTP {status}: {message}");
        Err(CoreError::Gateway {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetStore for HttpAssetStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn list(&self) -> Result<Vec<AssetRecord>, CoreError> {
        let url = self.assets_url();
        debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        let records: Vec<AssetRecord> = Self::check_status(resp).await?.json().await?;
        debug!("listed {} assets", records.len());
        Ok(records)
    }

    async fn create(&self, record: AssetRecord) -> Result<AssetRecord, CoreError> {
        let url = self.assets_url();
        debug!("POST {url} ({})", record.display_category());
        let resp = self.client.post(&url).json(&record).send().await?;
        let saved: AssetRecord = Self::check_status(resp).await?.json().await?;
        Ok(saved)
    }

    async fn delete(&self, id: &AssetId) -> Result<(), CoreError> {
        let url = format!("{}/{id}", self.assets_url());
        debug!("DELETE {url}");
        let resp = self.client.delete(&url).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }
}
