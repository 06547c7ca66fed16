use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ps_core::ports::RecordStorePort;
use ps_core::wire::{ApiResponse, DeletedCount, InsertBatchRequest, ListRecordsParams};
use ps_core::{ListKind, Page, PageQuery, Record, RecordId, RecordPatch};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// [`RecordStorePort`] backed by a remote `promptshelf serve` process.
/// 通过 HTTP 访问远端存储服务的记录存储。
///
/// A body that does not decode into the response envelope is reported as a
/// malformed response.
#[derive(Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.context("Request to record service failed")?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("Failed to read record service response")?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&body)
            .with_context(|| format!("Malformed response from record service (HTTP {})", status))?;
        envelope.into_result()
    }
}

#[async_trait]
impl RecordStorePort for HttpRecordStore {
    async fn query(&self, query: &PageQuery) -> Result<Page> {
        let params = ListRecordsParams {
            q: Some(query.text_filter.clone()).filter(|q| !q.is_empty()),
            cursor: query.cursor.map(|c| c.value()),
            limit: Some(query.limit),
        };
        let request = self
            .client
            .get(self.url(&format!("/lists/{}/records", query.list)))
            .query(&params);

        let page: Page = self.send(request).await?;
        debug!(list = %query.list, returned = page.items.len(), total = page.total, "fetched remote page");
        Ok(page)
    }

    async fn insert_batch(&self, batch: &[Record]) -> Result<()> {
        let request = self
            .client
            .post(self.url("/records/batch"))
            .json(&InsertBatchRequest {
                records: batch.to_vec(),
            });
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    async fn update_fields(&self, id: &RecordId, patch: &RecordPatch) -> Result<()> {
        let request = self
            .client
            .patch(self.url(&format!("/records/{}", id)))
            .json(patch);
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    async fn delete_one(&self, id: &RecordId) -> Result<()> {
        let request = self.client.delete(self.url(&format!("/records/{}", id)));
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    async fn delete_all_in_list(&self, list: ListKind) -> Result<u64> {
        let request = self
            .client
            .delete(self.url(&format!("/lists/{}/records", list)));
        let DeletedCount { deleted } = self.send(request).await?;
        Ok(deleted)
    }
}
