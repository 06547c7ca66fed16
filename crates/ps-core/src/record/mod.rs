//! Record domain models.
mod list_kind;
mod patch;
mod preview_links;
#[allow(clippy::module_inception)]
mod record;

pub use list_kind::{ListKind, ListKindParseError};
pub use patch::RecordPatch;
pub use preview_links::{PreviewLinkError, PreviewLinks};
pub use record::Record;
