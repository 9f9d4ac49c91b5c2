//! Infrastructure layer: adapters for config, logging, and snapshot storage.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod snapshot_cache;
pub mod snapshot_store;
pub mod storage_layout;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
