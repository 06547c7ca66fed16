//! # ps-server
//!
//! The `promptshelf serve` process: warp routes over a [`RecordStorePort`],
//! plus process bootstrap (tracing, configuration, startup).
//!
//! [`RecordStorePort`]: ps_core::ports::RecordStorePort

pub mod bootstrap;
pub mod error;
pub mod routes;

pub use error::ApiError;
