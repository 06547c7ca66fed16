use serde::{Deserialize, Serialize};

use super::PreviewLinks;

/// Field-level patch for a stored record. Only set fields are written.
///
/// Text, list and insertion order are immutable once stored, so the only
/// patchable field is the preview link set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_links: Option<PreviewLinks>,
}

impl RecordPatch {
    pub fn preview_links(links: PreviewLinks) -> Self {
        Self {
            preview_links: Some(links),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preview_links.is_none()
    }
}
