//! Preview-link cycling with debounced default persistence.
//! 预览图链接轮换，停止切换后延迟持久化默认链接。

mod cycler;
mod debouncer;

pub use cycler::PreviewCycler;
pub use debouncer::Debouncer;

use std::collections::HashMap;

use ps_core::{Record, RecordId};
use tokio::time::Duration;

use crate::list::ListController;

/// Cycles preview links of records in one list. Stepping is immediate;
/// once stepping stops for the debounce delay, the shown link becomes the
/// record's default through the list controller.
pub struct PreviewCycling {
    controller: ListController,
    debouncer: Debouncer,
    cyclers: HashMap<RecordId, PreviewCycler>,
}

impl PreviewCycling {
    pub fn new(controller: ListController, delay: Duration) -> Self {
        Self {
            controller,
            debouncer: Debouncer::new(delay),
            cyclers: HashMap::new(),
        }
    }

    /// Link to show for `record` in this render.
    pub fn current(&mut self, record: &Record) -> Option<String> {
        self.cyclers
            .entry(record.id.clone())
            .or_insert_with(|| PreviewCycler::new(&record.preview_links))
            .sync(&record.preview_links)
            .map(str::to_string)
    }

    /// Steps the cached record's shown link and (re)arms the debounce.
    pub async fn step(&mut self, id: &RecordId, delta: isize) -> Option<String> {
        let record = self.controller.get(id)?;
        let cycler = self
            .cyclers
            .entry(id.clone())
            .or_insert_with(|| PreviewCycler::new(&record.preview_links));
        cycler.sync(&record.preview_links);
        let link = cycler.step(&record.preview_links, delta)?.to_string();

        let controller = self.controller.clone();
        let target = id.clone();
        let chosen = link.clone();
        self.debouncer
            .schedule(id, async move {
                let _ = controller.set_default_link(&target, &chosen);
            })
            .await;
        Some(link)
    }

    /// Drops state for a record that left the list.
    pub async fn forget(&mut self, id: &RecordId) {
        self.cyclers.remove(id);
        self.debouncer.cancel(id).await;
    }
}
