//! # ps-core
//!
//! Core domain models and ports for PromptShelf.
//!
//! This crate contains the record model, the cursor pagination contract and
//! the port traits implemented by the infrastructure layer. It has no
//! infrastructure dependencies.

pub mod config;
pub mod ids;
pub mod page;
pub mod ports;
pub mod record;
pub mod wire;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::RecordId;
pub use page::{fold_case, text_matches, InsertionOrder, Page, PageQuery, PageQueryError, MAX_PAGE_LIMIT};
pub use record::{ListKind, ListKindParseError, PreviewLinkError, PreviewLinks, Record, RecordPatch};
