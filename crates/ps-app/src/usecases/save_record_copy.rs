use std::sync::Arc;

use anyhow::Result;
use ps_core::ports::ClockPort;
use ps_core::{ListKind, Record, RecordId};
use tracing::info;

use crate::list::{ListController, PersistHandle};

/// Use case for saving a copy of a generated record.
/// 将生成的记录另存一份到 saved 列表的用例。
///
/// The copy gets a new id, so the two lists never share ids for the same
/// logical item. Preview links are carried over.
pub struct SaveRecordCopy {
    generated: ListController,
    saved: ListController,
    clock: Arc<dyn ClockPort>,
}

impl SaveRecordCopy {
    pub fn new(generated: ListController, saved: ListController, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            generated,
            saved,
            clock,
        }
    }

    /// Copies the cached generated record `id` to the top of the saved list.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not cached in the generated list.
    #[tracing::instrument(
        name = "usecase.save_record_copy.execute",
        skip(self),
        fields(record_id = %id)
    )]
    pub fn execute(&self, id: &RecordId) -> Result<(Record, PersistHandle)> {
        let source = self
            .generated
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("Record not found in generated list: {}", id))?;

        let copy = source.copy_into(ListKind::Saved, self.clock.now_ms());
        let persist = self.saved.prepend(vec![copy.clone()]);

        info!(source_id = %id, copy_id = %copy.id, "Saved record copy");
        Ok((copy, persist))
    }
}
