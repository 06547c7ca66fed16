use std::sync::Arc;

use anyhow::Result;
use ps_core::ports::RecordStorePort;
use ps_core::{Page, PageQuery};
use tracing::debug;

/// Use case for serving one page of a list from the store.
/// 从存储分页查询某个列表的用例。
pub struct QueryRecords {
    store: Arc<dyn RecordStorePort>,
}

impl QueryRecords {
    pub fn from_arc(store: Arc<dyn RecordStorePort>) -> Self {
        Self { store }
    }

    /// Validates `query.limit` (1..=1000) and runs the query.
    ///
    /// # Errors
    ///
    /// Returns a [`ps_core::PageQueryError`] for an invalid limit, or the
    /// store error with context.
    #[tracing::instrument(
        name = "usecase.query_records.execute",
        skip(self, query),
        fields(list = %query.list, limit = query.limit, cursor = ?query.cursor)
    )]
    pub async fn execute(&self, query: &PageQuery) -> Result<Page> {
        query.validate()?;

        let page = self
            .store
            .query(query)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to query records: {}", e))?;

        debug!(returned = page.items.len(), total = page.total, "Queried records");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockStore;
    use ps_core::{ListKind, PageQueryError, MAX_PAGE_LIMIT};

    #[tokio::test]
    async fn rejects_out_of_range_limits_before_touching_store() {
        let mut store = MockStore::new();
        store.expect_query().never();
        let uc = QueryRecords::from_arc(Arc::new(store));

        for limit in [0, MAX_PAGE_LIMIT + 1] {
            let err = uc
                .execute(&PageQuery::first(ListKind::Generated, "", limit))
                .await
                .unwrap_err();
            assert!(err.downcast_ref::<PageQueryError>().is_some());
        }
    }

    #[tokio::test]
    async fn wraps_store_errors() {
        let mut store = MockStore::new();
        store
            .expect_query()
            .returning(|_| Err(anyhow::anyhow!("disk on fire")));
        let uc = QueryRecords::from_arc(Arc::new(store));

        let err = uc
            .execute(&PageQuery::first(ListKind::Saved, "", 10))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to query records"));
        assert!(err.to_string().contains("disk on fire"));
    }
}
