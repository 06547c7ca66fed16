//! Paginated list synchronization: cache state, epoch tickets and the
//! per-list controller that talks to the record store.

mod cache;
mod controller;

pub use cache::{ApplyOutcome, FetchTicket, ListCache};
pub use controller::{FetchOutcome, ListController, PersistHandle};

use ps_core::{ListKind, Record};

/// Owned, point-in-time view of a list cache for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub list: ListKind,
    pub items: Vec<Record>,
    pub total: u64,
    pub fetched_from_store: u64,
    pub has_more: bool,
    /// The first page of the active query has not been applied yet.
    pub first_page_pending: bool,
    pub is_fetching: bool,
    pub initial_loading: bool,
    pub query: String,
    pub epoch: u64,
}
