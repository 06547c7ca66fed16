use anyhow::Result;
use ps_core::{RecordId, RecordPatch};
use tracing::info;

use crate::list::{ListController, PersistHandle};

/// Use case for detaching a preview link from a record.
/// 从记录移除预览图链接的用例。
///
/// Removing the default link promotes the link that takes its position,
/// else the newest remaining one.
pub struct DetachPreviewLink {
    controller: ListController,
}

impl DetachPreviewLink {
    pub fn new(controller: ListController) -> Self {
        Self { controller }
    }

    #[tracing::instrument(
        name = "usecase.detach_preview_link.execute",
        skip(self),
        fields(record_id = %id, list = %self.controller.list())
    )]
    pub fn execute(&self, id: &RecordId, link: &str) -> Result<PersistHandle> {
        let record = self
            .controller
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Record not found: {}", id))?;

        let mut links = record.preview_links;
        links
            .remove(link)
            .map_err(|e| anyhow::anyhow!("Failed to detach preview link: {}", e))?;

        info!(
            link_count = links.len(),
            default = links.default_link().unwrap_or(""),
            "Detached preview link"
        );
        Ok(self
            .controller
            .update(id, RecordPatch::preview_links(links)))
    }
}
