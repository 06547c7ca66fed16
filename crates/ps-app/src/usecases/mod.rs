//! Business logic use cases
//! 业务用例
//!
//! [Generator]                       [Renderer]
//!      ↓                                 ↓
//! IngestGeneratedBatch            SaveRecordCopy
//!      ↓                          Attach/DetachPreviewLink
//! ---------------------------------------------------
//!      ↓
//! ListController (optimistic cache + fire-and-forget persistence)
//!
//! QueryRecords is the store-side entry point used by the service process.

pub mod attach_preview_link;
pub mod detach_preview_link;
pub mod ingest_generated_batch;
pub mod query_records;
pub mod save_record_copy;

pub use attach_preview_link::AttachPreviewLink;
pub use detach_preview_link::DetachPreviewLink;
pub use ingest_generated_batch::{IngestGeneratedBatch, IngestedBatch};
pub use query_records::QueryRecords;
pub use save_record_copy::SaveRecordCopy;
