use crate::{domain::snapshot::Snapshot, infra::error::AppError};

/// Blocking snapshot storage; callers move it off the event loop.
pub trait SnapshotStore: Send + Sync + 'static {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, AppError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), AppError>;
    /// Returns whether a stored snapshot was removed.
    fn clear(&self) -> Result<bool, AppError>;
}
