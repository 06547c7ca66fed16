//! Process-local record store.
//! 进程内记录存储。

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;
use ps_core::ports::RecordStorePort;
use ps_core::{InsertionOrder, ListKind, Page, PageQuery, Record, RecordId, RecordPatch};

#[derive(Default)]
struct State {
    /// Ascending by insertion order.
    records: Vec<Record>,
    last_seq: i64,
}

/// [`RecordStorePort`] over a `Vec`, with the same ordering and cursor
/// semantics as the SQLite store. Sequence numbers are never reused.
#[derive(Default)]
pub struct InMemoryRecordStore {
    state: Mutex<State>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across both lists.
    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.state().records.iter().find(|r| &r.id == id).cloned()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordStorePort for InMemoryRecordStore {
    async fn query(&self, query: &PageQuery) -> Result<Page> {
        query.validate()?;
        let state = self.state();
        Ok(query.select(state.records.iter().rev()))
    }

    async fn insert_batch(&self, batch: &[Record]) -> Result<()> {
        let mut state = self.state();
        if let Some(dup) = batch
            .iter()
            .find(|r| state.records.iter().any(|s| s.id == r.id))
        {
            return Err(anyhow::anyhow!("Record already exists: {}", dup.id));
        }
        for record in batch.iter().rev() {
            state.last_seq += 1;
            let mut stored = record.clone();
            stored.insertion_order = Some(InsertionOrder(state.last_seq));
            state.records.push(stored);
        }
        Ok(())
    }

    async fn update_fields(&self, id: &RecordId, patch: &RecordPatch) -> Result<()> {
        if let Some(record) = self.state().records.iter_mut().find(|r| &r.id == id) {
            record.apply_patch(patch);
        }
        Ok(())
    }

    async fn delete_one(&self, id: &RecordId) -> Result<()> {
        self.state().records.retain(|r| &r.id != id);
        Ok(())
    }

    async fn delete_all_in_list(&self, list: ListKind) -> Result<u64> {
        let mut state = self.state();
        let before = state.records.len();
        state.records.retain(|r| r.list != list);
        Ok((before - state.records.len()) as u64)
    }
}
