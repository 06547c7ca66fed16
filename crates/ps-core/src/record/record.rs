use serde::{Deserialize, Serialize};

use super::{ListKind, PreviewLinks, RecordPatch};
use crate::ids::RecordId;
use crate::page::InsertionOrder;

/// A short text item belonging to exactly one list.
/// 属于某个列表的一条短文本记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub text: String,
    pub list: ListKind,
    /// Batch timestamp in milliseconds. Never used for ordering.
    pub created_at_ms: i64,
    /// Store-assigned sequence number. `None` until the store confirms the
    /// insert; records fetched from the store always carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_order: Option<InsertionOrder>,
    #[serde(default)]
    pub preview_links: PreviewLinks,
}

impl Record {
    /// Builds a fresh, not-yet-persisted record with a new id.
    pub fn new(text: impl Into<String>, list: ListKind, created_at_ms: i64) -> Self {
        Self {
            id: RecordId::new(),
            text: text.into(),
            list,
            created_at_ms,
            insertion_order: None,
            preview_links: PreviewLinks::new(),
        }
    }

    /// Copies this record into `list` under a new id. The copy has no
    /// insertion order until the store assigns one.
    pub fn copy_into(&self, list: ListKind, created_at_ms: i64) -> Self {
        Self {
            id: RecordId::new(),
            text: self.text.clone(),
            list,
            created_at_ms,
            insertion_order: None,
            preview_links: self.preview_links.clone(),
        }
    }

    /// Whether this record belongs to the generation batch stamped `batch_ms`.
    pub fn is_in_batch(&self, batch_ms: i64) -> bool {
        self.created_at_ms == batch_ms
    }

    pub fn apply_patch(&mut self, patch: &RecordPatch) {
        if let Some(links) = &patch.preview_links {
            self.preview_links = links.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_into_assigns_new_id_and_keeps_links() {
        let mut original = Record::new("hello", ListKind::Generated, 10);
        original.insertion_order = Some(InsertionOrder(4));
        original.preview_links.add("https://img/1").unwrap();

        let copy = original.copy_into(ListKind::Saved, 20);

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.list, ListKind::Saved);
        assert_eq!(copy.text, "hello");
        assert_eq!(copy.insertion_order, None);
        assert_eq!(copy.preview_links, original.preview_links);
    }

    #[test]
    fn apply_patch_replaces_preview_links() {
        let mut record = Record::new("hello", ListKind::Generated, 10);
        let mut links = PreviewLinks::new();
        links.add("a").unwrap();

        record.apply_patch(&RecordPatch::preview_links(links.clone()));
        assert_eq!(record.preview_links, links);

        record.apply_patch(&RecordPatch::default());
        assert_eq!(record.preview_links, links);
    }

    #[test]
    fn batch_membership_uses_created_at() {
        let record = Record::new("x", ListKind::Generated, 1_000);
        assert!(record.is_in_batch(1_000));
        assert!(!record.is_in_batch(999));
    }
}
