//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases,
//! list synchronization) and infrastructure implementations. The core stays
//! independent of SQLite, HTTP and the clock.

mod clock;
mod record_store;

pub use clock::ClockPort;
pub use record_store::RecordStorePort;
