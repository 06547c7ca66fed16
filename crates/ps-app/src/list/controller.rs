use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ps_core::ports::RecordStorePort;
use ps_core::{ListKind, Record, RecordId, RecordPatch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::cache::{ApplyOutcome, FetchTicket, ListCache};
use super::ListSnapshot;

/// Handle of a fire-and-forget persistence task. Dropping it does not
/// cancel the task.
pub type PersistHandle = JoinHandle<()>;

/// Result of a fetch as seen by the caller. Fetch errors never escape the
/// controller; they resolve to `Failed` with the cache left renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { added: usize },
    /// A newer query superseded this fetch before it completed.
    Stale,
    /// Nothing to fetch: already in flight, exhausted, or query unchanged.
    Skipped,
    Failed,
}

/// Sole owner and write path of one list's cache.
/// 单个列表缓存的唯一持有者与写入路径。
///
/// Page fetches go through the single-flight guard in [`ListCache`].
/// Optimistic mutations apply to the cache synchronously and persist in
/// spawned tasks. Those tasks never change list contents; a confirmed delete
/// only lets the cache retire the id's tombstone.
#[derive(Clone)]
pub struct ListController {
    inner: Arc<Inner>,
}

struct Inner {
    list: ListKind,
    page_size: usize,
    store: Arc<dyn RecordStorePort>,
    cache: Mutex<ListCache>,
}

impl ListController {
    pub fn new(list: ListKind, store: Arc<dyn RecordStorePort>, page_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                list,
                page_size: page_size.max(1),
                store,
                cache: Mutex::new(ListCache::new(list)),
            }),
        }
    }

    pub fn list(&self) -> ListKind {
        self.inner.list
    }

    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.cache().snapshot()
    }

    /// Runs `f` against the cache without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&ListCache) -> R) -> R {
        f(&self.cache())
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.cache().get(id).cloned()
    }

    pub async fn set_query(&self, query: &str) -> FetchOutcome {
        let ticket = self.cache().set_query(query);
        match ticket {
            Some(ticket) => self.run_fetch(ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    pub async fn load_more(&self) -> FetchOutcome {
        let ticket = self.cache().load_more();
        match ticket {
            Some(ticket) => self.run_fetch(ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    /// Drops the cached prefix and refetches the active query from scratch.
    pub async fn reload(&self) -> FetchOutcome {
        let ticket = self.cache().reload();
        self.run_fetch(ticket).await
    }

    /// Adds newest-first `records` to the head of the list and persists them.
    pub fn prepend(&self, records: Vec<Record>) -> PersistHandle {
        let added = self.cache().prepend(records.clone());
        debug!(list = %self.inner.list, added, "prepended records");

        let store = Arc::clone(&self.inner.store);
        let list = self.inner.list;
        tokio::spawn(async move {
            if records.is_empty() {
                return;
            }
            if let Err(e) = store.insert_batch(&records).await {
                warn!(list = %list, count = records.len(), error = %e, "failed to persist inserted records");
            }
        })
    }

    /// Patches the cached record in place and persists the patch.
    pub fn update(&self, id: &RecordId, patch: RecordPatch) -> PersistHandle {
        let cached = self.cache().update(id, &patch);
        if !cached {
            debug!(list = %self.inner.list, record_id = %id, "update for record not in cache");
        }

        let store = Arc::clone(&self.inner.store);
        let id = id.clone();
        tokio::spawn(async move {
            if let Err(e) = store.update_fields(&id, &patch).await {
                warn!(record_id = %id, error = %e, "failed to persist record update");
            }
        })
    }

    /// Makes `link` the default preview of a cached record. Returns `None`
    /// when the record is not cached or the link is not attached.
    pub fn set_default_link(&self, id: &RecordId, link: &str) -> Option<PersistHandle> {
        let mut links = self.cache().get(id)?.preview_links.clone();
        if links.default_link() == Some(link) {
            return None;
        }
        links.set_default(link).ok()?;
        Some(self.update(id, RecordPatch::preview_links(links)))
    }

    pub fn remove(&self, id: &RecordId) -> PersistHandle {
        if self.cache().remove(id).is_some() {
            debug!(list = %self.inner.list, record_id = %id, "removed record");
        }

        let inner = Arc::clone(&self.inner);
        let id = id.clone();
        tokio::spawn(async move {
            match inner.store.delete_one(&id).await {
                Ok(()) => inner.cache().confirm_removed(&id),
                Err(e) => warn!(record_id = %id, error = %e, "failed to persist record deletion"),
            }
        })
    }

    /// Empties the list locally and deletes every stored record of it.
    pub fn clear(&self) -> PersistHandle {
        self.cache().clear();
        info!(list = %self.inner.list, "cleared list");

        let store = Arc::clone(&self.inner.store);
        let list = self.inner.list;
        tokio::spawn(async move {
            match store.delete_all_in_list(list).await {
                Ok(deleted) => debug!(list = %list, deleted, "cleared stored list"),
                Err(e) => warn!(list = %list, error = %e, "failed to clear stored list"),
            }
        })
    }

    async fn run_fetch(&self, ticket: FetchTicket) -> FetchOutcome {
        let query = ticket.to_page_query(self.inner.list, self.inner.page_size);
        let result = self.inner.store.query(&query).await;

        let mut cache = self.cache();
        match result {
            Ok(page) => match cache.apply(&ticket, page) {
                ApplyOutcome::Applied { added } => {
                    debug!(
                        list = %self.inner.list,
                        epoch = ticket.epoch(),
                        first_page = ticket.is_first_page(),
                        added,
                        total = cache.total(),
                        "applied page"
                    );
                    FetchOutcome::Applied { added }
                }
                ApplyOutcome::Stale => {
                    debug!(list = %self.inner.list, epoch = ticket.epoch(), "discarded superseded page");
                    FetchOutcome::Stale
                }
            },
            Err(e) => {
                if cache.fail(&ticket) {
                    warn!(list = %self.inner.list, query = ticket.query(), error = %e, "page fetch failed");
                    FetchOutcome::Failed
                } else {
                    debug!(list = %self.inner.list, epoch = ticket.epoch(), "superseded page fetch failed");
                    FetchOutcome::Stale
                }
            }
        }
    }

    fn cache(&self) -> MutexGuard<'_, ListCache> {
        self.inner.cache()
    }
}

impl Inner {
    fn cache(&self) -> MutexGuard<'_, ListCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
