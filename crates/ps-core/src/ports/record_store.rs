use anyhow::Result;
use async_trait::async_trait;

use crate::ids::RecordId;
use crate::page::{Page, PageQuery};
use crate::record::{ListKind, Record, RecordPatch};

/// Durable, ordered, searchable storage of records per list.
/// 按列表存储记录的持久化、有序、可搜索存储。
///
/// Implementations must honour the cursor contract documented in
/// [`crate::page`]: identical `(list, filter, cursor)` queries against an
/// unchanged store return identical pages.
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    /// Returns one page of `query.list`, newest first.
    async fn query(&self, query: &PageQuery) -> Result<Page>;

    /// Inserts a newest-first batch atomically. `records[0]` receives the
    /// highest insertion order.
    async fn insert_batch(&self, records: &[Record]) -> Result<()>;

    async fn update_fields(&self, id: &RecordId, patch: &RecordPatch) -> Result<()>;

    /// Deleting an unknown id is not an error.
    async fn delete_one(&self, id: &RecordId) -> Result<()>;

    /// Returns the number of deleted records.
    async fn delete_all_in_list(&self, list: ListKind) -> Result<u64>;
}
