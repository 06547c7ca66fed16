use anyhow::Result;
use ps_core::{RecordId, RecordPatch};
use tracing::{debug, info};

use crate::list::{ListController, PersistHandle};

/// Use case for attaching an external preview image reference to a record.
/// 为记录附加预览图链接的用例。
///
/// Links are stored as given; reachability is not checked. The first link
/// attached becomes the default.
pub struct AttachPreviewLink {
    controller: ListController,
}

impl AttachPreviewLink {
    pub fn new(controller: ListController) -> Self {
        Self { controller }
    }

    /// Returns `Ok(None)` when the link was already attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not cached or the link is blank.
    #[tracing::instrument(
        name = "usecase.attach_preview_link.execute",
        skip(self),
        fields(record_id = %id, list = %self.controller.list())
    )]
    pub fn execute(&self, id: &RecordId, link: &str) -> Result<Option<PersistHandle>> {
        let record = self
            .controller
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Record not found: {}", id))?;

        let mut links = record.preview_links;
        if !links.add(link)? {
            debug!(link, "Preview link already attached");
            return Ok(None);
        }

        let count = links.len();
        let persist = self
            .controller
            .update(id, RecordPatch::preview_links(links));
        info!(link_count = count, "Attached preview link");
        Ok(Some(persist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockStore;
    use ps_core::{ListKind, Page, Record};
    use std::sync::Arc;

    async fn controller_with(record: Record, store: MockStore) -> ListController {
        let mut store = store;
        let page = Page::new(vec![record], 1);
        store.expect_query().returning(move |_| Ok(page.clone()));
        let controller = ListController::new(ListKind::Saved, Arc::new(store), 10);
        controller.set_query("").await;
        controller
    }

    #[tokio::test]
    async fn first_link_becomes_default_and_is_persisted() {
        let record = Record::new("x", ListKind::Saved, 1);
        let id = record.id.clone();
        let mut store = MockStore::new();
        store
            .expect_update_fields()
            .withf(|_, patch: &RecordPatch| {
                patch
                    .preview_links
                    .as_ref()
                    .and_then(|l| l.default_link())
                    == Some("https://img/a")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let controller = controller_with(record, store).await;

        let persist = AttachPreviewLink::new(controller.clone())
            .execute(&id, "https://img/a")
            .unwrap()
            .expect("link is new");
        persist.await.unwrap();

        let cached = controller.get(&id).unwrap();
        assert_eq!(cached.preview_links.default_link(), Some("https://img/a"));
    }

    #[tokio::test]
    async fn duplicate_link_is_a_no_op() {
        let mut record = Record::new("x", ListKind::Saved, 1);
        record.preview_links.add("https://img/a").unwrap();
        let id = record.id.clone();
        let mut store = MockStore::new();
        store.expect_update_fields().never();
        let controller = controller_with(record, store).await;

        let outcome = AttachPreviewLink::new(controller)
            .execute(&id, "https://img/a")
            .unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn blank_link_is_rejected() {
        let record = Record::new("x", ListKind::Saved, 1);
        let id = record.id.clone();
        let controller = controller_with(record, MockStore::new()).await;

        assert!(AttachPreviewLink::new(controller).execute(&id, "  ").is_err());
    }
}
