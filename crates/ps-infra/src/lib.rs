//! # ps-infra
//!
//! Infrastructure adapters for PromptShelf: the SQLite record store, the
//! HTTP client store, an in-memory store, configuration loading and
//! platform paths.

pub mod config;
pub mod db;
pub mod fs;
pub mod http;
pub mod memory;
pub mod time;

pub use config::load_config;
pub use http::HttpRecordStore;
pub use memory::InMemoryRecordStore;
pub use time::SystemClock;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ps_core::ports::RecordStorePort;

use db::mappers::RecordRowMapper;
use db::repositories::DieselRecordStore;
use db::DieselSqliteExecutor;

/// Opens (creating if needed) the SQLite store under `data_dir`.
pub fn open_sqlite_store(data_dir: &Path) -> Result<Arc<dyn RecordStorePort>> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    let db_path = fs::db_path(data_dir);
    let url = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Database path is not valid UTF-8: {}", db_path.display()))?;

    let pool = db::pool::init_db_pool(url)?;
    Ok(Arc::new(DieselRecordStore::new(
        DieselSqliteExecutor::new(pool),
        RecordRowMapper,
        RecordRowMapper,
    )))
}
