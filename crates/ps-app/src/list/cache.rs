//! Per-list client cache.
//! 单个列表的客户端缓存。
//!
//! `ListCache` is a synchronous state machine. Fetches are issued as
//! [`FetchTicket`]s and their results handed back through [`ListCache::apply`]
//! or [`ListCache::fail`]; every ticket carries the epoch it was issued in
//! and results from an older epoch are dropped without touching state.

use std::collections::HashMap;

use ps_core::{InsertionOrder, ListKind, Page, PageQuery, Record, RecordId, RecordPatch};

use super::ListSnapshot;

/// A page request issued by the cache. Must be resolved with `apply` or `fail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    /// Issue order across all epochs.
    seq: u64,
    query: String,
    cursor: Option<InsertionOrder>,
}

impl FetchTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> Option<InsertionOrder> {
        self.cursor
    }

    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn to_page_query(&self, list: ListKind, limit: usize) -> PageQuery {
        PageQuery::first(list, self.query.clone(), limit).after(self.cursor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { added: usize },
    /// The ticket belongs to a superseded epoch; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListCache {
    list: ListKind,
    items: Vec<Record>,
    total: u64,
    fetched_from_store: u64,
    active_cursor: Option<InsertionOrder>,
    /// `None` until the first `set_query`.
    active_query: Option<String>,
    epoch: u64,
    in_flight: bool,
    initial_loading: bool,
    first_page_applied: bool,
    /// Tickets issued so far.
    issued: u64,
    /// Ids removed locally. The value is `None` until the store confirms the
    /// delete, then the first ticket sequence guaranteed to observe it.
    removed: HashMap<RecordId, Option<u64>>,
}

impl ListCache {
    pub fn new(list: ListKind) -> Self {
        Self {
            list,
            items: Vec::new(),
            total: 0,
            fetched_from_store: 0,
            active_cursor: None,
            active_query: None,
            epoch: 0,
            in_flight: false,
            initial_loading: false,
            first_page_applied: false,
            issued: 0,
            removed: HashMap::new(),
        }
    }

    pub fn list(&self) -> ListKind {
        self.list
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.items.iter().find(|r| &r.id == id)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn fetched_from_store(&self) -> u64 {
        self.fetched_from_store
    }

    pub fn active_cursor(&self) -> Option<InsertionOrder> {
        self.active_cursor
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    pub fn is_initial_loading(&self) -> bool {
        self.initial_loading
    }

    pub fn has_more(&self) -> bool {
        self.fetched_from_store < self.total
    }

    /// True while the current epoch has not received its first page, e.g.
    /// after that fetch failed.
    pub fn first_page_pending(&self) -> bool {
        !self.first_page_applied
    }

    /// Number of locally removed ids still hidden from incoming pages.
    pub fn pending_removals(&self) -> usize {
        self.removed.len()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            list: self.list,
            items: self.items.clone(),
            total: self.total,
            fetched_from_store: self.fetched_from_store,
            has_more: self.has_more(),
            first_page_pending: !self.first_page_applied,
            is_fetching: self.in_flight,
            initial_loading: self.initial_loading,
            query: self.active_query.clone().unwrap_or_default(),
            epoch: self.epoch,
        }
    }

    /// Starts a new epoch for `query` unless it is already the active one.
    /// Repeating the active query re-requests its first page if that page
    /// never arrived.
    pub fn set_query(&mut self, query: &str) -> Option<FetchTicket> {
        if self.active_query.as_deref() == Some(query) {
            if self.in_flight || self.first_page_applied {
                return None;
            }
            self.initial_loading = self.items.is_empty();
            return Some(self.issue(None));
        }
        self.reset(query.to_string());
        Some(self.issue(None))
    }

    /// Restarts pagination for the active query, e.g. on a full reload.
    pub fn reload(&mut self) -> FetchTicket {
        let query = self.active_query.clone().unwrap_or_default();
        self.reset(query);
        self.issue(None)
    }

    /// Issues the next page request, or `None` when one is already in flight
    /// or every matching record has been fetched.
    ///
    /// If the current epoch never received its first page (it failed, or no
    /// query was set yet) the first page is requested again.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if self.in_flight {
            return None;
        }
        if !self.first_page_applied {
            if self.active_query.is_none() {
                self.active_query = Some(String::new());
            }
            self.initial_loading = self.items.is_empty();
            return Some(self.issue(None));
        }
        if !self.has_more() {
            return None;
        }
        Some(self.issue(self.active_cursor))
    }

    /// Merges a page response. A first page replaces `items`, later pages
    /// append.
    pub fn apply(&mut self, ticket: &FetchTicket, page: Page) -> ApplyOutcome {
        if ticket.epoch != self.epoch {
            return ApplyOutcome::Stale;
        }
        self.in_flight = false;
        self.initial_loading = false;

        let Page {
            items,
            total,
            next_cursor,
        } = page;
        let received = items.len();
        let fresh: Vec<Record> = items
            .into_iter()
            .filter(|r| !self.removed.contains_key(&r.id))
            .collect();
        let added = fresh.len();
        // Tombstones confirmed before this ticket was issued are no longer needed.
        self.removed
            .retain(|_, observed_from| observed_from.map_or(true, |from| ticket.seq < from));

        if ticket.is_first_page() {
            self.items = fresh;
            self.fetched_from_store = added as u64;
            self.total = total.saturating_sub((received - added) as u64);
            self.first_page_applied = true;
        } else if received == 0 {
            // Nothing left below the cursor.
            self.total = self.fetched_from_store;
        } else {
            self.items.extend(fresh);
            self.fetched_from_store += added as u64;
        }
        self.total = self.total.max(self.fetched_from_store);

        if next_cursor.is_some() {
            self.active_cursor = next_cursor;
        }
        ApplyOutcome::Applied { added }
    }

    /// Records a failed fetch. Returns `false` for a stale ticket.
    pub fn fail(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.in_flight = false;
        self.initial_loading = false;
        true
    }

    /// Inserts records ahead of everything cached. `records[0]` is newest.
    pub fn prepend(&mut self, records: Vec<Record>) -> usize {
        let count = records.len();
        if count == 0 {
            return 0;
        }
        self.items.splice(0..0, records);
        self.total += count as u64;
        self.fetched_from_store += count as u64;
        count
    }

    pub fn update(&mut self, id: &RecordId, patch: &RecordPatch) -> bool {
        match self.items.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let idx = self.items.iter().position(|r| &r.id == id)?;
        let record = self.items.remove(idx);
        self.total = self.total.saturating_sub(1);
        self.fetched_from_store = self.fetched_from_store.saturating_sub(1);
        self.removed.insert(id.clone(), None);
        Some(record)
    }

    /// Marks the delete of `id` as applied by the store. Its tombstone is
    /// dropped once a page requested after this point has been applied.
    pub fn confirm_removed(&mut self, id: &RecordId) {
        let next = self.issued + 1;
        if let Some(observed_from) = self.removed.get_mut(id) {
            *observed_from = Some(next);
        }
    }

    /// Empties the list. Responses for the old contents are discarded.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.items.clear();
        self.total = 0;
        self.fetched_from_store = 0;
        self.active_cursor = None;
        self.in_flight = false;
        self.initial_loading = false;
        self.first_page_applied = true;
        self.removed.clear();
    }

    fn reset(&mut self, query: String) {
        self.epoch += 1;
        self.items.clear();
        self.total = 0;
        self.fetched_from_store = 0;
        self.active_cursor = None;
        self.active_query = Some(query);
        self.in_flight = false;
        self.initial_loading = true;
        self.first_page_applied = false;
    }

    fn issue(&mut self, cursor: Option<InsertionOrder>) -> FetchTicket {
        self.in_flight = true;
        self.issued += 1;
        FetchTicket {
            epoch: self.epoch,
            seq: self.issued,
            query: self.active_query.clone().unwrap_or_default(),
            cursor,
        }
    }
}
