use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, CacheConfig, DialogsConfig, LogConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub dialogs: Option<FileDialogsConfig>,
    pub cache: Option<FileCacheConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(dialogs) = self.dialogs {
            dialogs.merge_into(&mut config.dialogs);
        }

        if let Some(cache) = self.cache {
            cache.merge_into(&mut config.cache);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDialogsConfig {
    pub archive_panel_height: Option<u32>,
}

impl FileDialogsConfig {
    fn merge_into(self, config: &mut DialogsConfig) {
        if let Some(height) = self.archive_panel_height {
            config.archive_panel_height = height;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileCacheConfig {
    pub enabled: Option<bool>,
    pub path: Option<PathBuf>,
}

impl FileCacheConfig {
    fn merge_into(self, config: &mut CacheConfig) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }

        if let Some(path) = self.path {
            config.path = Some(path);
        }
    }
}
