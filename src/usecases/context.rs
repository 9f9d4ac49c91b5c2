use std::path::PathBuf;

use crate::infra::config::AppConfig;

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub snapshot_path: PathBuf,
}

impl AppContext {
    pub fn new(config: AppConfig, snapshot_path: PathBuf) -> Self {
        Self {
            config,
            snapshot_path,
        }
    }
}
