//! Cursor pagination contract between the list cache and the record store.
//! 列表缓存与记录存储之间的游标分页协议。
//!
//! Records are walked newest-first by [`InsertionOrder`]. A cursor is the
//! insertion order of the last record a client has seen; the next page holds
//! only records strictly below it. New inserts always receive a higher
//! insertion order than any cursor already handed out, so they never
//! resurface in a cursor-bounded page, and deletions only leave gaps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::{ListKind, Record};

/// Business rule: maximum records per page.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Store-assigned, monotonically increasing sequence number. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsertionOrder(pub i64);

impl InsertionOrder {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for InsertionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageQueryError {
    #[error("Invalid limit: {0}. Must be at least 1")]
    LimitTooSmall(usize),

    #[error("Invalid limit: {0}. Must be at most {MAX_PAGE_LIMIT}")]
    LimitTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub list: ListKind,
    /// Case-insensitive substring filter. Empty matches everything.
    #[serde(default)]
    pub text_filter: String,
    /// Exclusive upper bound on insertion order. `None` starts at the newest.
    #[serde(default)]
    pub cursor: Option<InsertionOrder>,
    pub limit: usize,
}

impl PageQuery {
    pub fn first(list: ListKind, text_filter: impl Into<String>, limit: usize) -> Self {
        Self {
            list,
            text_filter: text_filter.into(),
            cursor: None,
            limit,
        }
    }

    pub fn after(mut self, cursor: Option<InsertionOrder>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn validate(&self) -> Result<(), PageQueryError> {
        if self.limit == 0 {
            return Err(PageQueryError::LimitTooSmall(self.limit));
        }
        if self.limit > MAX_PAGE_LIMIT {
            return Err(PageQueryError::LimitTooLarge(self.limit));
        }
        Ok(())
    }

    /// Whether `record` belongs to this query's result set, ignoring the cursor.
    pub fn matches(&self, record: &Record) -> bool {
        record.list == self.list && text_matches(&record.text, &self.text_filter)
    }

    /// Applies the cursor contract to an in-memory record set.
    ///
    /// Records without an insertion order are not part of any store and are
    /// ignored. This is the reference behaviour the SQL repository mirrors.
    pub fn select<'a>(&self, records: impl IntoIterator<Item = &'a Record>) -> Page {
        let mut matching: Vec<&Record> = records
            .into_iter()
            .filter(|r| r.insertion_order.is_some() && self.matches(r))
            .collect();
        matching.sort_by(|a, b| b.insertion_order.cmp(&a.insertion_order));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .filter(|r| match (self.cursor, r.insertion_order) {
                (Some(cursor), Some(order)) => order < cursor,
                _ => true,
            })
            .take(self.limit)
            .cloned()
            .collect();

        Page::new(items, total)
    }
}

/// Case-insensitive substring match; an empty filter matches all. Case is
/// folded with Unicode lowercase and whitespace is significant.
pub fn text_matches(text: &str, filter: &str) -> bool {
    filter.is_empty() || fold_case(text).contains(&fold_case(filter))
}

/// Case folding shared by every store so filters behave identically.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// One slice of a list, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Record>,
    /// Count of all records matching `(list, filter)` regardless of cursor.
    pub total: u64,
    /// Insertion order of the last item, `None` when the page is empty.
    pub next_cursor: Option<InsertionOrder>,
}

impl Page {
    pub fn new(items: Vec<Record>, total: u64) -> Self {
        let next_cursor = items.last().and_then(|r| r.insertion_order);
        Self {
            items,
            total,
            next_cursor,
        }
    }

    pub fn empty(total: u64) -> Self {
        Self::new(Vec::new(), total)
    }
}
