use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    domain::snapshot::Snapshot,
    infra::{contracts::SnapshotStore, error::AppError},
};

/// Snapshot kept as a single JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(AppError::SnapshotRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| AppError::SnapshotDecode {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(snapshot.bounded()))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        let write_error = |source| AppError::SnapshotWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = serde_json::to_vec(snapshot).map_err(|source| AppError::SnapshotDecode {
            path: self.path.clone(),
            source,
        })?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(write_error)?;
        fs::rename(&temp_path, &self.path).map_err(write_error)
    }

    fn clear(&self) -> Result<bool, AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AppError::SnapshotWrite {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
